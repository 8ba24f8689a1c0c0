//! Synthesis configuration.
//!
//! Provides [`SynthConfig`] for the environment defaults a stack is
//! synthesized against. Values are loaded from environment variables so CI
//! and local synthesis pick up the target account without code changes.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::DxStackResult;
use crate::stack::StackEnv;
use crate::types::{AccountId, AwsRegion};

/// Defaults applied to stacks that do not pin an environment explicitly.
///
/// # Examples
///
/// ```
/// use dxstack_core::SynthConfig;
///
/// let config = SynthConfig::default();
/// assert_eq!(config.default_region, "us-east-1");
/// assert_eq!(config.log_level, "info");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct SynthConfig {
    /// Default AWS account ID stacks are synthesized for.
    #[builder(default = String::from(AccountId::DEFAULT))]
    pub default_account: String,

    /// Default AWS region.
    #[builder(default = String::from(AwsRegion::DEFAULT))]
    pub default_region: String,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            default_account: String::from(AccountId::DEFAULT),
            default_region: String::from(AwsRegion::DEFAULT),
            log_level: String::from("info"),
        }
    }
}

impl SynthConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables (falling back to defaults):
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `DEFAULT_ACCOUNT` | `000000000000` |
    /// | `DEFAULT_REGION` | `us-east-1` |
    /// | `LOG_LEVEL` | `info` |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("DEFAULT_ACCOUNT") {
            config.default_account = v;
        }
        if let Ok(v) = std::env::var("DEFAULT_REGION") {
            config.default_region = v;
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }

    /// Build the [`StackEnv`] these defaults describe.
    ///
    /// # Errors
    /// Fails if the configured account ID is not a 12-digit numeric string.
    pub fn stack_env(&self) -> DxStackResult<StackEnv> {
        Ok(StackEnv {
            account: AccountId::new(self.default_account.clone())?,
            region: AwsRegion::new(self.default_region.clone()),
        })
    }
}
