//! CDN distribution fronting an S3 bucket.

use serde_json::{Value, json};
use tracing::debug;

use dxstack_core::intrinsics::{get_att, get_ref, sub};
use dxstack_core::{DxStackResult, Resource, Stack};
use dxstack_iam::PolicyStatement;
use dxstack_s3::Bucket;
use typed_builder::TypedBuilder;

use crate::options::{
    AllowedMethods, CachedMethods, EdgeEventType, PriceClass, SecurityPolicy, SslMethod,
    ViewerProtocolPolicy,
};

/// AWS managed `CachingOptimized` cache policy, the default for S3-backed
/// behaviors.
pub const MANAGED_CACHING_OPTIMIZED: &str = "658327ea-f89d-4fab-a63d-7e88639e58f6";

/// An edge function association on the default behavior.
#[derive(Debug, Clone)]
pub struct EdgeAssociation {
    /// Which lifecycle event triggers the function.
    pub event_type: EdgeEventType,
    /// ARN of a *published version* of the function.
    pub function_version_arn: Value,
}

impl EdgeAssociation {
    /// Associate a published function version with the viewer-request event.
    #[must_use]
    pub fn viewer_request(function_version_arn: Value) -> Self {
        Self {
            event_type: EdgeEventType::ViewerRequest,
            function_version_arn,
        }
    }
}

/// Custom-domain settings: alternate names plus the certificate that
/// covers them.
#[derive(Debug, Clone)]
pub struct DomainAliases {
    /// Alternate domain names (CNAMEs) for the distribution.
    pub aliases: Vec<String>,
    /// ARN of the certificate covering the aliases; must be issued in
    /// `us-east-1`.
    pub certificate_arn: Value,
    /// How the certificate is served.
    pub ssl_method: SslMethod,
    /// Minimum TLS version.
    pub security_policy: SecurityPolicy,
}

impl DomainAliases {
    /// Aliases served via SNI with the default TLS floor.
    #[must_use]
    pub fn new(aliases: Vec<String>, certificate_arn: Value) -> Self {
        Self {
            aliases,
            certificate_arn,
            ssl_method: SslMethod::default(),
            security_policy: SecurityPolicy::default(),
        }
    }
}

/// Properties for a [`Distribution`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct DistributionProps {
    /// Object served for the root URL.
    #[builder(default = String::from("index.html"))]
    pub default_root_object: String,

    /// Edge location coverage.
    #[builder(default)]
    pub price_class: PriceClass,

    /// Viewer protocol handling on the default behavior.
    #[builder(default)]
    pub viewer_protocol_policy: ViewerProtocolPolicy,

    /// Methods forwarded to the origin.
    #[builder(default)]
    pub allowed_methods: AllowedMethods,

    /// Methods whose responses are cached.
    #[builder(default)]
    pub cached_methods: CachedMethods,

    /// Custom domain names and their certificate.
    #[builder(default)]
    pub domain: Option<DomainAliases>,

    /// Edge functions on the default behavior.
    #[builder(default)]
    pub edge_associations: Vec<EdgeAssociation>,

    /// Whether access logs are written to a dedicated log bucket created
    /// alongside the distribution.
    #[builder(default = true)]
    pub enable_logging: bool,
}

impl Default for DistributionProps {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A CDN distribution reading from an S3 origin through origin access
/// control, with the bucket policy scoped to this distribution alone.
#[derive(Debug)]
pub struct Distribution {
    logical_id: String,
}

impl Distribution {
    /// Add the distribution (plus its origin access control and, when
    /// logging is on, its log bucket) to the stack, and grant the CDN read
    /// access to `bucket` conditioned on this distribution's ARN.
    ///
    /// # Errors
    /// Fails on logical ID collisions.
    pub fn new(
        stack: &mut Stack,
        id: &str,
        bucket: &mut Bucket,
        props: DistributionProps,
    ) -> DxStackResult<Self> {
        let oac_id = stack.add_resource(
            &format!("{id}Oac"),
            Resource::new(
                "AWS::CloudFront::OriginAccessControl",
                json!({
                    "OriginAccessControlConfig": {
                        "Name": format!("{}-{id}", stack.name()),
                        "OriginAccessControlOriginType": "s3",
                        "SigningBehavior": "no-override",
                        "SigningProtocol": "sigv4",
                    },
                }),
            ),
        )?;

        let origin_id = format!("{id}S3Origin");
        let mut default_behavior = json!({
            "TargetOriginId": origin_id,
            "ViewerProtocolPolicy": props.viewer_protocol_policy.as_str(),
            "AllowedMethods": props.allowed_methods.methods(),
            "CachedMethods": props.cached_methods.methods(),
            "CachePolicyId": MANAGED_CACHING_OPTIMIZED,
        });
        if !props.edge_associations.is_empty() {
            let associations: Vec<Value> = props
                .edge_associations
                .iter()
                .map(|assoc| {
                    json!({
                        "EventType": assoc.event_type.as_str(),
                        "LambdaFunctionARN": assoc.function_version_arn,
                    })
                })
                .collect();
            default_behavior["LambdaFunctionAssociations"] = Value::Array(associations);
        }

        let mut config = json!({
            "Enabled": true,
            "DefaultRootObject": props.default_root_object,
            "PriceClass": props.price_class.as_str(),
            "Origins": [{
                "Id": origin_id,
                "DomainName": bucket.regional_domain_name(),
                "OriginAccessControlId": get_ref(&oac_id),
                // OAC replaces the legacy origin access identity, which
                // must still be present and empty.
                "S3OriginConfig": { "OriginAccessIdentity": "" },
            }],
            "DefaultCacheBehavior": default_behavior,
        });

        if let Some(domain) = &props.domain {
            config["Aliases"] = json!(domain.aliases);
            config["ViewerCertificate"] = json!({
                "AcmCertificateArn": domain.certificate_arn,
                "SslSupportMethod": domain.ssl_method.as_str(),
                "MinimumProtocolVersion": domain.security_policy.as_str(),
            });
        }

        if props.enable_logging {
            let log_bucket_id = stack.add_resource(
                &format!("{id}LogBucket"),
                Resource::new(
                    "AWS::S3::Bucket",
                    json!({
                        // Log delivery requires ACL-style writes.
                        "OwnershipControls": {
                            "Rules": [{ "ObjectOwnership": "BucketOwnerPreferred" }],
                        },
                    }),
                ),
            )?;
            config["Logging"] =
                json!({ "Bucket": get_att(&log_bucket_id, "RegionalDomainName") });
        }

        let logical_id = stack.add_resource(
            id,
            Resource::new(
                "AWS::CloudFront::Distribution",
                json!({ "DistributionConfig": config }),
            ),
        )?;
        debug!(distribution = %logical_id, origin = %bucket.logical_id(), "added distribution");

        // Only this distribution may read the origin bucket.
        let source_arn = sub(&format!(
            "arn:aws:cloudfront::${{AWS::AccountId}}:distribution/${{{logical_id}}}"
        ));
        let statement = PolicyStatement::allow()
            .action("s3:GetObject")
            .service_principal("cloudfront.amazonaws.com")
            .resource(bucket.objects_arn())
            .condition("StringEquals", json!({ "AWS:SourceArn": source_arn }));
        bucket.add_to_resource_policy(stack, statement)?;

        Ok(Self { logical_id })
    }

    /// The distribution's logical ID within its stack.
    #[must_use]
    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    /// Intrinsic resolving to the distribution ID.
    #[must_use]
    pub fn distribution_id(&self) -> Value {
        get_ref(&self.logical_id)
    }

    /// Intrinsic resolving to the generated `*.cloudfront.net` domain name,
    /// the target for alias records.
    #[must_use]
    pub fn domain_name(&self) -> Value {
        get_att(&self.logical_id, "DomainName")
    }
}
