//! Certificate covering several domains across several hosted zones.

use serde_json::{Value, json};
use tracing::debug;

use dxstack_core::intrinsics::get_ref;
use dxstack_core::{DxStackError, DxStackResult, Resource, Stack};
use dxstack_route53::HostedZoneRef;

/// Properties for a [`MultiDomainCertificate`].
#[derive(Debug, Clone)]
pub struct MultiDomainCertificateProps {
    /// The primary domain; its first host name becomes the certificate's
    /// primary name.
    pub primary: HostedZoneRef,
    /// Additional domains covered by the certificate.
    pub alternatives: Vec<HostedZoneRef>,
    /// Host names applied to every domain. The empty string stands for
    /// the zone apex.
    pub host_names: Vec<String>,
}

/// One certificate spanning every `host.domain` combination, validated
/// against the hosted zone each name belongs to.
#[derive(Debug)]
pub struct MultiDomainCertificate {
    logical_id: String,
}

impl MultiDomainCertificate {
    /// Add the certificate to the stack.
    ///
    /// # Errors
    /// Fails when no host names are given, and on logical ID collisions.
    pub fn new(
        stack: &mut Stack,
        id: &str,
        props: MultiDomainCertificateProps,
    ) -> DxStackResult<Self> {
        if props.host_names.is_empty() {
            return Err(DxStackError::InvalidInput(
                "at least one host name is required (use \"\" for the zone apex)".to_owned(),
            ));
        }

        let mut zones = vec![props.primary.clone()];
        zones.extend(props.alternatives.iter().cloned());

        // Fully qualified name per (domain, host) pair, first occurrence
        // wins so the primary domain's first host leads the certificate.
        let mut fqdns: Vec<(String, &HostedZoneRef)> = Vec::new();
        for zone in &zones {
            for host in &props.host_names {
                let fqdn = if host.is_empty() {
                    zone.zone_name.clone()
                } else {
                    format!("{host}.{}", zone.zone_name)
                };
                if !fqdns.iter().any(|(existing, _)| existing == &fqdn) {
                    fqdns.push((fqdn, zone));
                }
            }
        }

        let (primary_name, _) = &fqdns[0];
        let san_names: Vec<&str> = fqdns[1..].iter().map(|(name, _)| name.as_str()).collect();
        let validation_options: Vec<Value> = fqdns
            .iter()
            .map(|(name, zone)| {
                json!({ "DomainName": name, "HostedZoneId": zone.hosted_zone_id })
            })
            .collect();
        debug!(primary = %primary_name, sans = san_names.len(), "requested multi-domain certificate");

        let mut properties = json!({
            "DomainName": primary_name,
            "ValidationMethod": "DNS",
            "DomainValidationOptions": validation_options,
        });
        if !san_names.is_empty() {
            properties["SubjectAlternativeNames"] = json!(san_names);
        }

        let logical_id = stack.add_resource(
            id,
            Resource::new("AWS::CertificateManager::Certificate", properties),
        )?;
        Ok(Self { logical_id })
    }

    /// The certificate's logical ID within its stack.
    #[must_use]
    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    /// Intrinsic resolving to the certificate ARN.
    #[must_use]
    pub fn arn(&self) -> Value {
        get_ref(&self.logical_id)
    }
}
