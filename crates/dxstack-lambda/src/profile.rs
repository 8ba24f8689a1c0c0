//! Function sizing profiles.
//!
//! A [`FunctionProfile`] names a preset of runtime, memory, and timeout
//! settings. The registry is an immutable mapping built once at process
//! start; [`resolve`] merges a profile's defaults with caller overrides,
//! override fields winning key by key.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use dxstack_core::{Duration, DxStackError};

/// Lambda runtime identifiers used by the constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Runtime {
    /// Node.js 22.
    #[serde(rename = "nodejs22.x")]
    Nodejs22,
}

impl Runtime {
    /// The runtime identifier the provisioning engine expects.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nodejs22 => "nodejs22.x",
        }
    }
}

/// Named sizing presets for functions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FunctionProfile {
    /// Smallest possible footprint for trivial handlers.
    Tiny,
    /// Light request handlers.
    Small,
    /// Heavier processing with a one-minute budget.
    Medium,
    /// Edge functions, which the CDN caps at small memory and short timeouts.
    Edge,
}

impl FunctionProfile {
    /// Every registered profile.
    pub const ALL: [FunctionProfile; 4] = [Self::Tiny, Self::Small, Self::Medium, Self::Edge];

    /// The profile's symbolic name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tiny => "tiny",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Edge => "edge",
        }
    }

    /// The profile's registered defaults, unchanged.
    #[must_use]
    pub fn defaults(self) -> FunctionConfig {
        REGISTRY[&self].clone()
    }
}

impl fmt::Display for FunctionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FunctionProfile {
    type Err = DxStackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tiny" => Ok(Self::Tiny),
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "edge" => Ok(Self::Edge),
            other => Err(DxStackError::InvalidProfile {
                name: other.to_owned(),
            }),
        }
    }
}

/// Resolved function sizing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionConfig {
    /// Runtime the function executes under.
    pub runtime: Runtime,
    /// Memory size in megabytes.
    pub memory_size: u32,
    /// Execution timeout.
    pub timeout: Duration,
}

/// Caller overrides for a function profile.
///
/// Fields left as `None` fall through to the profile default; fields set
/// replace the default outright.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionOverrides {
    /// Override the runtime.
    pub runtime: Option<Runtime>,
    /// Override the memory size in megabytes.
    pub memory_size: Option<u32>,
    /// Override the timeout.
    pub timeout: Option<Duration>,
}

static REGISTRY: LazyLock<BTreeMap<FunctionProfile, FunctionConfig>> = LazyLock::new(|| {
    BTreeMap::from([
        (
            FunctionProfile::Tiny,
            FunctionConfig {
                runtime: Runtime::Nodejs22,
                memory_size: 128,
                timeout: Duration::seconds(3),
            },
        ),
        (
            FunctionProfile::Small,
            FunctionConfig {
                runtime: Runtime::Nodejs22,
                memory_size: 256,
                timeout: Duration::seconds(10),
            },
        ),
        (
            FunctionProfile::Medium,
            FunctionConfig {
                runtime: Runtime::Nodejs22,
                memory_size: 512,
                timeout: Duration::minutes(1),
            },
        ),
        (
            FunctionProfile::Edge,
            FunctionConfig {
                runtime: Runtime::Nodejs22,
                memory_size: 128,
                timeout: Duration::seconds(5),
            },
        ),
    ])
});

/// Merge a profile's defaults with caller overrides, overrides winning.
#[must_use]
pub fn resolve(profile: FunctionProfile, overrides: &FunctionOverrides) -> FunctionConfig {
    let base = profile.defaults();
    FunctionConfig {
        runtime: overrides.runtime.unwrap_or(base.runtime),
        memory_size: overrides.memory_size.unwrap_or(base.memory_size),
        timeout: overrides.timeout.unwrap_or(base.timeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_return_registry_defaults_unchanged() {
        for profile in FunctionProfile::ALL {
            assert_eq!(resolve(profile, &FunctionOverrides::default()), profile.defaults());
        }
    }

    #[test]
    fn test_should_prefer_overrides_key_by_key() {
        let overrides = FunctionOverrides {
            memory_size: Some(1024),
            ..FunctionOverrides::default()
        };
        let config = resolve(FunctionProfile::Small, &overrides);
        assert_eq!(config.memory_size, 1024);
        // Untouched keys keep the profile default.
        assert_eq!(config.timeout, Duration::seconds(10));
        assert_eq!(config.runtime, Runtime::Nodejs22);
    }

    #[test]
    fn test_should_parse_profile_names() {
        assert_eq!("edge".parse::<FunctionProfile>().unwrap(), FunctionProfile::Edge);
        let err = "huge".parse::<FunctionProfile>().unwrap_err();
        assert!(matches!(err, DxStackError::InvalidProfile { name } if name == "huge"));
    }

    #[test]
    fn test_should_resolve_idempotently() {
        let overrides = FunctionOverrides {
            timeout: Some(Duration::seconds(30)),
            ..FunctionOverrides::default()
        };
        assert_eq!(
            resolve(FunctionProfile::Medium, &overrides),
            resolve(FunctionProfile::Medium, &overrides)
        );
    }

    #[test]
    fn test_should_cap_edge_profile() {
        let config = FunctionProfile::Edge.defaults();
        assert_eq!(config.memory_size, 128);
        assert_eq!(config.timeout, Duration::seconds(5));
    }
}
