//! Error types for the dxstack core.

/// Core error type for dxstack constructs.
///
/// Every variant is a synchronous, caller-side configuration mistake:
/// nothing here is transient or retryable, and failures surface before any
/// resource has been added to the template.
#[derive(Debug, thiserror::Error)]
pub enum DxStackError {
    /// A profile name outside the registered enumeration was requested.
    #[error("invalid profile: {name:?} is not a registered profile name")]
    InvalidProfile {
        /// The profile name as supplied by the caller.
        name: String,
    },

    /// A domain name that cannot yield a two-label root domain.
    #[error("invalid domain name: {name:?} ({reason})")]
    InvalidDomain {
        /// The offending input.
        name: String,
        /// Why the input was rejected.
        reason: String,
    },

    /// A stack name violating the CloudFormation naming rules.
    #[error("invalid stack name: {name:?} ({reason})")]
    InvalidStackName {
        /// The offending name.
        name: String,
        /// Why the name was rejected.
        reason: String,
    },

    /// Two resources resolved to the same logical ID within one stack.
    #[error("duplicate logical ID: {0}")]
    DuplicateLogicalId(String),

    /// A construct input failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience result type for dxstack operations.
pub type DxStackResult<T> = Result<T, DxStackError>;
