//! Opinionated S3 bucket construct.
//!
//! A [`Bucket`] resolves its profile and overrides (see [`crate::profile`]),
//! emits the bucket resource with the resolved settings, and exports name
//! and ARN outputs. Buckets that auto-delete their contents also get the
//! cleanup custom resource that empties the bucket on teardown.

use serde_json::{Value, json};
use tracing::debug;

use dxstack_core::intrinsics::{get_att, get_ref, sub};
use dxstack_core::{DxStackError, DxStackResult, Output, Resource, Stack};
use dxstack_iam::{PolicyDocument, PolicyStatement, Role, RoleProps};
use dxstack_lambda::{Function, FunctionProfile, FunctionProps};

use crate::profile::{BucketConfig, BucketOverrides, BucketProfile, resolve};

/// Inline handler that empties a bucket when its stack is deleted.
/// Without it, deleting a stack whose bucket still holds objects fails.
const CLEANUP_HANDLER: &str = r"
const { S3Client, ListObjectsV2Command, DeleteObjectCommand } = require('@aws-sdk/client-s3');
const response = require('cfn-response');
const client = new S3Client({});

exports.handler = async (event, context) => {
    let status = response.SUCCESS;
    if (event.RequestType === 'Delete') {
        try {
            const bucket = event.ResourceProperties.BucketName;
            let token = undefined;
            do {
                const data = await client.send(new ListObjectsV2Command({
                    Bucket: bucket,
                    ContinuationToken: token,
                }));
                for (const obj of data.Contents || []) {
                    await client.send(new DeleteObjectCommand({ Bucket: bucket, Key: obj.Key }));
                }
                token = data.IsTruncated ? data.NextContinuationToken : undefined;
            } while (token);
        } catch (err) {
            console.error('cleanup failed', err);
            status = response.FAILED;
        }
    }
    await response.send(event, context, status);
};
";

/// Properties for a [`Bucket`].
///
/// The profile determines the configuration of the bucket:
/// - [`BucketProfile::Dev`]: versioned, auto-deleted, destroyed with the stack.
/// - [`BucketProfile::Prod`]: versioned, encrypted, retained.
/// - [`BucketProfile::Archive`]: unversioned, retained, one-year expiration.
///
/// `overrides` extend or replace individual profile settings, e.g.
///
/// ```
/// use dxstack_core::Duration;
/// use dxstack_s3::{BucketOverrides, BucketProps, BucketProfile, LifecycleRule};
///
/// let props = BucketProps {
///     profile: BucketProfile::Prod,
///     overrides: BucketOverrides {
///         bucket_name: Some("my-custom-prod-bucket".to_owned()),
///         lifecycle_rules: Some(vec![LifecycleRule::expire_after(Duration::days(90))]),
///         ..BucketOverrides::default()
///     },
/// };
/// assert_eq!(props.profile.as_str(), "prod");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BucketProps {
    /// Configuration preset.
    pub profile: BucketProfile,
    /// Settings that override or extend the profile.
    pub overrides: BucketOverrides,
}

/// An `AWS::S3::Bucket` (plus supporting resources) in a stack.
#[derive(Debug)]
pub struct Bucket {
    logical_id: String,
    policy_logical_id: Option<String>,
    config: BucketConfig,
}

impl Bucket {
    /// Add a bucket to the stack.
    ///
    /// # Errors
    /// Fails on logical ID collisions within the stack.
    pub fn new(stack: &mut Stack, id: &str, props: BucketProps) -> DxStackResult<Self> {
        let config = resolve(props.profile, &props.overrides);
        debug!(profile = %props.profile, ?config, "resolved bucket configuration");

        let mut properties = json!({});
        if let Some(name) = &config.bucket_name {
            properties["BucketName"] = json!(name);
        }
        if config.versioned {
            properties["VersioningConfiguration"] = json!({ "Status": "Enabled" });
        }
        if let Some(encryption) = config.encryption {
            properties["BucketEncryption"] = json!({
                "ServerSideEncryptionConfiguration": [{
                    "ServerSideEncryptionByDefault": {
                        "SSEAlgorithm": encryption.sse_algorithm(),
                    },
                }],
            });
        }
        if !config.lifecycle_rules.is_empty() {
            let rules: Vec<Value> = config
                .lifecycle_rules
                .iter()
                .map(|rule| {
                    let mut r = json!({
                        "Status": "Enabled",
                        "ExpirationInDays": rule.expiration.whole_days(),
                    });
                    if let Some(prefix) = &rule.prefix {
                        r["Prefix"] = json!(prefix);
                    }
                    r
                })
                .collect();
            properties["LifecycleConfiguration"] = json!({ "Rules": rules });
        }
        if let Some(website) = &config.website {
            properties["WebsiteConfiguration"] = json!({
                "IndexDocument": website.index_document,
                "ErrorDocument": website.error_document,
            });
            // Public website content needs the public-policy block lifted.
            properties["PublicAccessBlockConfiguration"] =
                json!({ "BlockPublicPolicy": false });
        }

        let resource = Resource::new("AWS::S3::Bucket", properties)
            .with_removal_policy(config.removal_policy);
        let logical_id = stack.add_resource(id, resource)?;

        stack.add_output(
            &format!("{id}BucketName"),
            Output::new(get_ref(&logical_id), "The name of the S3 bucket")
                .exported_as(format!("{id}-BucketName")),
        )?;
        stack.add_output(
            &format!("{id}BucketArn"),
            Output::new(get_att(&logical_id, "Arn"), "The ARN of the S3 bucket")
                .exported_as(format!("{id}-BucketArn")),
        )?;

        let mut bucket = Self {
            logical_id,
            policy_logical_id: None,
            config,
        };

        if bucket.config.website.is_some() {
            let statement = PolicyStatement::allow()
                .action("s3:GetObject")
                .any_principal()
                .resource(bucket.objects_arn());
            bucket.add_to_resource_policy(stack, statement)?;
        }
        if bucket.config.auto_delete_objects {
            bucket.add_cleanup_resources(stack, id)?;
        }

        Ok(bucket)
    }

    /// The bucket's logical ID within its stack.
    #[must_use]
    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    /// The configuration the bucket was created from.
    #[must_use]
    pub fn config(&self) -> &BucketConfig {
        &self.config
    }

    /// Intrinsic resolving to the bucket name.
    #[must_use]
    pub fn bucket_name(&self) -> Value {
        get_ref(&self.logical_id)
    }

    /// Intrinsic resolving to the bucket ARN.
    #[must_use]
    pub fn arn(&self) -> Value {
        get_att(&self.logical_id, "Arn")
    }

    /// Intrinsic resolving to an ARN covering every object in the bucket.
    #[must_use]
    pub fn objects_arn(&self) -> Value {
        sub(&format!("arn:aws:s3:::${{{}}}/*", self.logical_id))
    }

    /// Intrinsic resolving to the bucket's regional domain name, the form a
    /// CDN origin expects.
    #[must_use]
    pub fn regional_domain_name(&self) -> Value {
        get_att(&self.logical_id, "RegionalDomainName")
    }

    /// Append a statement to the bucket's resource policy, creating the
    /// policy resource on first use.
    ///
    /// # Errors
    /// Fails on logical ID collisions or if the policy resource was
    /// tampered with externally.
    pub fn add_to_resource_policy(
        &mut self,
        stack: &mut Stack,
        statement: PolicyStatement,
    ) -> DxStackResult<()> {
        match &self.policy_logical_id {
            None => {
                let document = serde_json::to_value(&PolicyDocument::new(vec![statement]))
                    .map_err(anyhow::Error::from)?;
                let properties = json!({
                    "Bucket": get_ref(&self.logical_id),
                    "PolicyDocument": document,
                });
                let policy_id = stack.add_resource(
                    &format!("{}Policy", self.logical_id),
                    Resource::new("AWS::S3::BucketPolicy", properties),
                )?;
                self.policy_logical_id = Some(policy_id);
            }
            Some(policy_id) => {
                let resource = stack.resource_mut(policy_id).ok_or_else(|| {
                    DxStackError::InvalidInput(format!(
                        "bucket policy resource {policy_id} is missing from the stack"
                    ))
                })?;
                let statements = resource.properties["PolicyDocument"]["Statement"]
                    .as_array_mut()
                    .ok_or_else(|| {
                        DxStackError::InvalidInput(
                            "bucket policy document has no statement list".to_owned(),
                        )
                    })?;
                statements.push(serde_json::to_value(&statement).map_err(anyhow::Error::from)?);
            }
        }
        Ok(())
    }

    /// Emit the cleanup trio: an execution role scoped to this bucket, the
    /// inline cleanup function, and the custom resource that triggers it on
    /// stack deletion.
    fn add_cleanup_resources(&self, stack: &mut Stack, id: &str) -> DxStackResult<()> {
        let cleanup_policy = PolicyDocument::new(vec![
            PolicyStatement::allow()
                .action("s3:ListBucket")
                .resource(self.arn()),
            PolicyStatement::allow()
                .actions(["s3:DeleteObject", "s3:DeleteObjectVersion"])
                .resource(self.objects_arn()),
        ]);
        let role = Role::new(
            stack,
            &format!("{id}CleanupRole"),
            RoleProps::assumed_by(PolicyDocument::lambda_assume_role())
                .described(format!("Empties the {id} bucket on stack deletion"))
                .with_policy("bucket-cleanup", cleanup_policy)
                .with_managed_policy(
                    "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole",
                ),
        )?;

        let function = Function::new(
            stack,
            &format!("{id}CleanupFunction"),
            FunctionProps::inline(
                FunctionProfile::Small,
                "index.handler",
                role.arn(),
                CLEANUP_HANDLER,
            ),
        )?;

        stack.add_resource(
            &format!("{id}Cleanup"),
            Resource::new(
                "Custom::S3BucketCleanup",
                json!({
                    "ServiceToken": function.arn(),
                    "BucketName": self.bucket_name(),
                }),
            ),
        )?;
        Ok(())
    }
}
