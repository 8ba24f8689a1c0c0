//! DNS-validated certificate construct.

use serde_json::{Value, json};
use tracing::debug;

use dxstack_core::intrinsics::get_ref;
use dxstack_core::{AwsRegion, DxStackError, DxStackResult, Output, Resource, Stack};

/// Properties for a [`Certificate`].
#[derive(Debug, Clone)]
pub struct CertificateProps {
    /// Domain the certificate covers, e.g. `dev.example.com`. One leading
    /// wildcard label is allowed (`*.dev.example.com`).
    pub domain_name: String,
    /// Hosted zone the DNS validation records are written into.
    pub hosted_zone_id: String,
    /// Additional names covered by the certificate.
    pub subject_alternative_names: Vec<String>,
    /// Region the certificate is issued in. Certificates consumed by the
    /// CDN must live in `us-east-1`; the value is recorded on the
    /// construct for the caller's stack targeting, since templates
    /// themselves are region-less.
    pub region: Option<AwsRegion>,
}

impl CertificateProps {
    /// Props covering a single domain.
    #[must_use]
    pub fn new(domain_name: impl Into<String>, hosted_zone_id: impl Into<String>) -> Self {
        Self {
            domain_name: domain_name.into(),
            hosted_zone_id: hosted_zone_id.into(),
            subject_alternative_names: Vec::new(),
            region: None,
        }
    }
}

/// An `AWS::CertificateManager::Certificate` with DNS validation.
#[derive(Debug)]
pub struct Certificate {
    logical_id: String,
    region: Option<AwsRegion>,
}

impl Certificate {
    /// Add a certificate to the stack, along with a `CertificateArn`
    /// output exported under that same name.
    ///
    /// # Errors
    /// Fails on an empty domain name or hosted zone ID, on a malformed
    /// wildcard, or on logical ID collisions.
    pub fn new(stack: &mut Stack, id: &str, props: CertificateProps) -> DxStackResult<Self> {
        if props.domain_name.trim().is_empty() {
            return Err(DxStackError::InvalidInput(
                "the domain name property is required and cannot be empty".to_owned(),
            ));
        }
        if props.hosted_zone_id.trim().is_empty() {
            return Err(DxStackError::InvalidInput(
                "the hosted zone ID property is required and cannot be empty".to_owned(),
            ));
        }
        validate_wildcard(&props.domain_name)?;

        let mut properties = json!({
            "DomainName": props.domain_name,
            "ValidationMethod": "DNS",
            "DomainValidationOptions": [{
                "DomainName": props.domain_name,
                "HostedZoneId": props.hosted_zone_id,
            }],
        });
        if !props.subject_alternative_names.is_empty() {
            properties["SubjectAlternativeNames"] = json!(props.subject_alternative_names);
        }

        let logical_id = stack.add_resource(
            id,
            Resource::new("AWS::CertificateManager::Certificate", properties),
        )?;
        debug!(domain = %props.domain_name, logical_id = %logical_id, "requested certificate");

        stack.add_output(
            "CertificateArn",
            Output::new(get_ref(&logical_id), "The ARN of the certificate")
                .exported_as("CertificateArn"),
        )?;

        Ok(Self {
            logical_id,
            region: props.region,
        })
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

    /// The region the certificate was requested for, if pinned.
    #[must_use]
    pub fn region(&self) -> Option<&AwsRegion> {
        self.region.as_ref()
    }
}

/// A wildcard, if present, must be the sole leading label.
fn validate_wildcard(domain_name: &str) -> DxStackResult<()> {
    let wildcards = domain_name.matches('*').count();
    if wildcards == 0 {
        return Ok(());
    }
    if wildcards > 1 || !domain_name.starts_with("*.") {
        return Err(DxStackError::InvalidDomain {
            name: domain_name.to_owned(),
            reason: "a wildcard must be the single leading label, like \"*.example.com\""
                .to_owned(),
        });
    }
    Ok(())
}
