//! Hosted zones, record sets, and cross-account DNS delegation.
//!
//! The delegation convention: the account owning a root domain provisions
//! a [`DelegationRole`] named after that domain; member accounts derive
//! the role's ARN from a subdomain name alone ([`delegation_role_arn`])
//! and use it to write their NS delegation record. Both halves share
//! [`DELEGATION_ROLE_PREFIX`], so the contract cannot drift apart.

mod delegation;
mod domain;
mod records;
mod zone;

pub use delegation::{DelegationRole, DelegationRoleProps, ZoneDelegation, ZoneDelegationProps};
pub use domain::{DELEGATION_ROLE_PREFIX, delegation_role_arn, delegation_role_name, root_domain};
pub use records::{CLOUDFRONT_HOSTED_ZONE_ID, DomainRecords};
pub use zone::{HostedZoneRef, SubdomainZone, SubdomainZoneProps};
