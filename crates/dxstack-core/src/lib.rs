//! Core types, template model, and stack synthesis for dxstack.
//!
//! This crate provides the foundational building blocks shared across all
//! dxstack construct crates: the error type, common AWS value types, the
//! CloudFormation template model with intrinsic-function helpers, and the
//! [`Stack`] registry constructs attach their resources to.
//!
//! The resource-provisioning engine itself (dependency ordering, change
//! sets, rollback) sits on the far side of the synthesized template and is
//! deliberately not modeled here.

mod config;
mod error;
pub mod intrinsics;
mod stack;
mod template;
mod types;

pub use config::SynthConfig;
pub use error::{DxStackError, DxStackResult};
pub use stack::{Stack, StackEnv, sanitize_logical_id};
pub use template::{DeletionPolicy, Export, Output, Resource, Template, TEMPLATE_FORMAT_VERSION};
pub use types::{AccountId, AwsRegion, Duration, RemovalPolicy, environments, tags};
