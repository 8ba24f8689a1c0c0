//! Synthesis tests for the dxstack constructs.
//!
//! Constructs are exercised against real [`Stack`]s and assertions run on
//! the synthesized template JSON, in the spirit of template-assertion
//! testing: a test states the wire-level properties a resource must carry
//! and a subset matcher checks them against the synthesized document.

use std::sync::Once;

use serde_json::Value;

use dxstack_core::{AwsRegion, Stack, SynthConfig};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// A stack pinned to a fixed test environment.
#[must_use]
pub fn test_stack(name: &str) -> Stack {
    init_tracing();
    let config = SynthConfig::builder()
        .default_account("123456789012".into())
        .default_region(AwsRegion::US_EAST_1.into())
        .build();
    let env = config.stack_env().expect("test environment");
    Stack::new(name, env).expect("test stack name")
}

/// The synthesized template as JSON.
#[must_use]
pub fn synth(stack: &Stack) -> Value {
    stack.to_value().expect("template serialization")
}

/// Logical IDs of every resource of the given type.
#[must_use]
pub fn resources_of_type(template: &Value, resource_type: &str) -> Vec<String> {
    template["Resources"]
        .as_object()
        .map(|resources| {
            resources
                .iter()
                .filter(|(_, r)| r["Type"] == resource_type)
                .map(|(id, _)| id.clone())
                .collect()
        })
        .unwrap_or_default()
}

/// Whether some resource of the given type carries at least the expected
/// properties (recursive subset match; arrays compare element-wise).
#[must_use]
pub fn has_resource_properties(template: &Value, resource_type: &str, expected: &Value) -> bool {
    template["Resources"]
        .as_object()
        .is_some_and(|resources| {
            resources.values().any(|resource| {
                resource["Type"] == resource_type
                    && is_subset(expected, &resource["Properties"])
            })
        })
}

/// Recursive subset check: every key in `expected` must exist in `actual`
/// with a matching value; arrays must match pairwise at full length.
#[must_use]
pub fn is_subset(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Object(exp), Value::Object(act)) => exp
            .iter()
            .all(|(key, value)| act.get(key).is_some_and(|a| is_subset(value, a))),
        (Value::Array(exp), Value::Array(act)) => {
            exp.len() == act.len()
                && exp.iter().zip(act.iter()).all(|(e, a)| is_subset(e, a))
        }
        _ => expected == actual,
    }
}

mod test_bucket;
mod test_certificate;
mod test_dns;
mod test_profiles;
mod test_web;
