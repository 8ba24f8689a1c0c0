//! Record sets on an existing hosted zone.

use serde_json::{Value, json};

use dxstack_core::{DxStackResult, Resource, Stack, sanitize_logical_id};

use crate::zone::HostedZoneRef;

/// Hosted zone ID CloudFront aliases must target, identical for every
/// distribution.
pub const CLOUDFRONT_HOSTED_ZONE_ID: &str = "Z2FDTNDATAQYW2";

/// Default TTL (seconds) for CNAME records.
const CNAME_TTL: &str = "300";

/// Records attached to a zone the caller already owns, referenced by name
/// and ID rather than created here.
#[derive(Debug, Clone)]
pub struct DomainRecords {
    zone: HostedZoneRef,
}

impl DomainRecords {
    /// Wrap an existing zone.
    #[must_use]
    pub fn new(zone: HostedZoneRef) -> Self {
        Self { zone }
    }

    /// The underlying zone reference.
    #[must_use]
    pub fn zone(&self) -> &HostedZoneRef {
        &self.zone
    }

    /// Point the zone apex at a CloudFront distribution with an alias A
    /// record. `distribution_domain` is the distribution's generated
    /// domain name (usually a `Fn::GetAtt`).
    ///
    /// # Errors
    /// Fails on logical ID collisions.
    pub fn add_cloudfront_alias(
        &self,
        stack: &mut Stack,
        distribution_domain: Value,
    ) -> DxStackResult<String> {
        let id = format!("CloudFrontAlias{}", sanitize_logical_id(&self.zone.zone_name));
        stack.add_resource(
            &id,
            Resource::new(
                "AWS::Route53::RecordSet",
                json!({
                    "HostedZoneId": self.zone.hosted_zone_id,
                    "Name": self.zone.zone_name,
                    "Type": "A",
                    "AliasTarget": {
                        "DNSName": distribution_domain,
                        "HostedZoneId": CLOUDFRONT_HOSTED_ZONE_ID,
                    },
                }),
            ),
        )
    }

    /// Add a CNAME per host name pointing at `target_domain`. Empty host
    /// names are skipped, matching how callers pass a shared host list
    /// where the empty string stands for the zone apex (already covered by
    /// the alias record).
    ///
    /// # Errors
    /// Fails on logical ID collisions.
    pub fn add_cnames(
        &self,
        stack: &mut Stack,
        host_names: &[String],
        target_domain: &str,
    ) -> DxStackResult<Vec<String>> {
        let mut ids = Vec::new();
        for host in host_names.iter().filter(|h| !h.is_empty()) {
            let id = format!(
                "Cname{}{}",
                sanitize_logical_id(&self.zone.zone_name),
                sanitize_logical_id(host)
            );
            let logical_id = stack.add_resource(
                &id,
                Resource::new(
                    "AWS::Route53::RecordSet",
                    json!({
                        "HostedZoneId": self.zone.hosted_zone_id,
                        "Name": format!("{host}.{}", self.zone.zone_name),
                        "Type": "CNAME",
                        "TTL": CNAME_TTL,
                        "ResourceRecords": [target_domain],
                    }),
                ),
            )?;
            ids.push(logical_id);
        }
        Ok(ids)
    }
}
