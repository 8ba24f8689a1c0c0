//! IAM building blocks shared by the dxstack construct crates.
//!
//! Provides the JSON policy document model and a thin `AWS::IAM::Role`
//! construct. Roles that live in *other* accounts (such as the
//! cross-account DNS delegation role) are referenced by conventional ARN,
//! not created here; see `dxstack-route53` for the naming convention.

mod policy;
mod role;

pub use policy::{Effect, POLICY_VERSION, PolicyDocument, PolicyStatement};
pub use role::{Role, RoleProps};
