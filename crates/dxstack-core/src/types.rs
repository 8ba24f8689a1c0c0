//! Common AWS value types shared across construct crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// AWS Account ID (12-digit string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Placeholder account ID used when no account is configured.
    pub const DEFAULT: &str = "000000000000";

    /// Create a new account ID from a string.
    ///
    /// # Errors
    /// Returns an error if the account ID is not a 12-digit numeric string.
    pub fn new(id: impl Into<String>) -> Result<Self, crate::DxStackError> {
        let id = id.into();
        if id.len() != 12 || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(crate::DxStackError::InvalidInput(format!(
                "invalid AWS account ID: {id} (must be 12-digit numeric string)"
            )));
        }
        Ok(Self(id))
    }

    /// Get the account ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// AWS Region identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AwsRegion(String);

impl AwsRegion {
    /// N. Virginia. Also where CloudFront-facing certificates must live.
    pub const US_EAST_1: &str = "us-east-1";
    /// Ohio.
    pub const US_EAST_2: &str = "us-east-2";
    /// N. California.
    pub const US_WEST_1: &str = "us-west-1";
    /// Oregon.
    pub const US_WEST_2: &str = "us-west-2";

    /// Default region.
    pub const DEFAULT: &str = Self::US_EAST_1;

    /// Create a new region.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self(region.into())
    }

    /// Get the region as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AwsRegion {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for AwsRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What happens to a resource when its stack is deleted or the resource is
/// removed from the template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalPolicy {
    /// Keep the resource (and any data it holds) when the stack goes away.
    #[default]
    Retain,
    /// Delete the resource along with the stack.
    Destroy,
    /// Snapshot the resource before deleting it, where the service supports it.
    Snapshot,
}

/// A span of time, stored as whole seconds.
///
/// Used for record TTLs, function timeouts, and lifecycle expirations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Duration(u64);

impl Duration {
    /// Five minutes.
    pub const SHORT: Duration = Duration::minutes(5);
    /// One hour.
    pub const MEDIUM: Duration = Duration::hours(1);
    /// One day.
    pub const LONG: Duration = Duration::days(1);

    /// A duration of `n` seconds.
    #[must_use]
    pub const fn seconds(n: u64) -> Self {
        Self(n)
    }

    /// A duration of `n` minutes.
    #[must_use]
    pub const fn minutes(n: u64) -> Self {
        Self(n * 60)
    }

    /// A duration of `n` hours.
    #[must_use]
    pub const fn hours(n: u64) -> Self {
        Self(n * 3600)
    }

    /// A duration of `n` days.
    #[must_use]
    pub const fn days(n: u64) -> Self {
        Self(n * 86_400)
    }

    /// Total seconds.
    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Whole days, truncating any partial day.
    #[must_use]
    pub const fn whole_days(&self) -> u64 {
        self.0 / 86_400
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Well-known tag keys applied across stacks.
pub mod tags {
    /// Deployment environment tag key.
    pub const ENVIRONMENT: &str = "Environment";
    /// Project tag key.
    pub const PROJECT: &str = "Project";
    /// Cost center tag key.
    pub const COST_CENTER: &str = "CostCenter";
    /// Owner tag key.
    pub const OWNER: &str = "Owner";
}

/// Canonical environment names used as tag values.
pub mod environments {
    /// Development environment.
    pub const DEV: &str = "development";
    /// Staging environment.
    pub const STAGE: &str = "staging";
    /// Production environment.
    pub const PROD: &str = "production";
}
