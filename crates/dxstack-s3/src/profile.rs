//! Bucket profiles: named presets of retention, versioning, and lifecycle
//! settings.
//!
//! The registry is an immutable mapping built once at process start and
//! exposed read-only. [`resolve`] merges a profile's defaults with caller
//! overrides using a shallow, right-biased merge: every field set in the
//! overrides fully replaces the profile value, fields left unset fall
//! through, and structured fields (the lifecycle rule list) are replaced
//! wholesale, never merged element-wise.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use dxstack_core::{Duration, DxStackError, RemovalPolicy};

/// Named bucket configuration presets.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BucketProfile {
    /// Development: versioned, destroyed with the stack, objects
    /// auto-deleted so teardown never fails on a non-empty bucket.
    #[default]
    Dev,
    /// Production: versioned, encrypted, retained when the stack goes away.
    Prod,
    /// Archival: unversioned, retained, contents expired after a year.
    Archive,
}

impl BucketProfile {
    /// Every registered profile.
    pub const ALL: [BucketProfile; 3] = [Self::Dev, Self::Prod, Self::Archive];

    /// The profile's symbolic name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Prod => "prod",
            Self::Archive => "archive",
        }
    }

    /// The profile's registered defaults, unchanged.
    #[must_use]
    pub fn defaults(self) -> BucketConfig {
        REGISTRY[&self].clone()
    }
}

impl fmt::Display for BucketProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BucketProfile {
    type Err = DxStackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            "archive" => Ok(Self::Archive),
            other => Err(DxStackError::InvalidProfile {
                name: other.to_owned(),
            }),
        }
    }
}

/// Server-side encryption applied to a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BucketEncryption {
    /// Keys managed by the storage service itself.
    S3Managed,
    /// Keys managed through KMS.
    KmsManaged,
}

impl BucketEncryption {
    /// The `SSEAlgorithm` wire value.
    #[must_use]
    pub fn sse_algorithm(self) -> &'static str {
        match self {
            Self::S3Managed => "AES256",
            Self::KmsManaged => "aws:kms",
        }
    }
}

/// A lifecycle rule expiring objects after a fixed duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleRule {
    /// Age at which objects expire.
    pub expiration: Duration,
    /// Key prefix the rule applies to; `None` covers the whole bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl LifecycleRule {
    /// Expire all objects after the given duration.
    #[must_use]
    pub fn expire_after(expiration: Duration) -> Self {
        Self {
            expiration,
            prefix: None,
        }
    }
}

/// Static website hosting settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteConfig {
    /// Index document served for directory requests.
    pub index_document: String,
    /// Error document.
    pub error_document: String,
}

impl Default for WebsiteConfig {
    fn default() -> Self {
        Self {
            index_document: "index.html".to_owned(),
            error_document: "index.html".to_owned(),
        }
    }
}

/// A bucket's resolved configuration: profile defaults merged with
/// overrides. This is the only configuration value handed onward to the
/// resource emission step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketConfig {
    /// Explicit bucket name; omitted, the provisioning engine generates one.
    pub bucket_name: Option<String>,
    /// Whether object versioning is enabled.
    pub versioned: bool,
    /// What happens to the bucket when the stack goes away.
    pub removal_policy: RemovalPolicy,
    /// Whether bucket contents are deleted on teardown via a cleanup
    /// custom resource.
    pub auto_delete_objects: bool,
    /// Server-side encryption, if any.
    pub encryption: Option<BucketEncryption>,
    /// Lifecycle rules.
    pub lifecycle_rules: Vec<LifecycleRule>,
    /// Static website hosting, if enabled. Website buckets additionally
    /// get a public-read policy and an unblocked public access policy.
    pub website: Option<WebsiteConfig>,
}

/// Caller overrides for a bucket profile.
///
/// Fields left as `None` fall through to the profile default. Structured
/// fields (`lifecycle_rules` in particular) are replaced wholesale:
/// overriding one rule of several means supplying the complete replacement
/// list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketOverrides {
    /// Override the bucket name.
    pub bucket_name: Option<String>,
    /// Override the versioning flag.
    pub versioned: Option<bool>,
    /// Override the removal policy.
    pub removal_policy: Option<RemovalPolicy>,
    /// Override the auto-delete flag.
    pub auto_delete_objects: Option<bool>,
    /// Override the encryption setting.
    pub encryption: Option<BucketEncryption>,
    /// Replace the lifecycle rule list wholesale.
    pub lifecycle_rules: Option<Vec<LifecycleRule>>,
    /// Override the website configuration.
    pub website: Option<WebsiteConfig>,
}

static REGISTRY: LazyLock<BTreeMap<BucketProfile, BucketConfig>> = LazyLock::new(|| {
    BTreeMap::from([
        (
            BucketProfile::Dev,
            BucketConfig {
                bucket_name: None,
                versioned: true,
                removal_policy: RemovalPolicy::Destroy,
                auto_delete_objects: true,
                encryption: None,
                lifecycle_rules: Vec::new(),
                website: None,
            },
        ),
        (
            BucketProfile::Prod,
            BucketConfig {
                bucket_name: None,
                versioned: true,
                removal_policy: RemovalPolicy::Retain,
                // Retain objects in production.
                auto_delete_objects: false,
                encryption: Some(BucketEncryption::S3Managed),
                lifecycle_rules: Vec::new(),
                website: None,
            },
        ),
        (
            BucketProfile::Archive,
            BucketConfig {
                bucket_name: None,
                versioned: false,
                removal_policy: RemovalPolicy::Retain,
                auto_delete_objects: false,
                encryption: None,
                lifecycle_rules: vec![LifecycleRule::expire_after(Duration::days(365))],
                website: None,
            },
        ),
    ])
});

/// Merge a profile's defaults with caller overrides, overrides winning
/// key by key. Pure function of its inputs.
#[must_use]
pub fn resolve(profile: BucketProfile, overrides: &BucketOverrides) -> BucketConfig {
    let base = profile.defaults();
    BucketConfig {
        bucket_name: overrides.bucket_name.clone().or(base.bucket_name),
        versioned: overrides.versioned.unwrap_or(base.versioned),
        removal_policy: overrides.removal_policy.unwrap_or(base.removal_policy),
        auto_delete_objects: overrides
            .auto_delete_objects
            .unwrap_or(base.auto_delete_objects),
        encryption: overrides.encryption.or(base.encryption),
        lifecycle_rules: overrides
            .lifecycle_rules
            .clone()
            .unwrap_or(base.lifecycle_rules),
        website: overrides.website.clone().or(base.website),
    }
}
