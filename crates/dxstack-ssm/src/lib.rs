//! Namespaced parameter store construct.

mod parameter;

pub use parameter::{ParameterSet, ParameterSetProps, ParameterValue};
