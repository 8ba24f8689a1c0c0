//! CloudFormation intrinsic function helpers.
//!
//! Small constructors for the handful of intrinsics the construct crates
//! need. The provisioning engine resolves these at deploy time; within a
//! template they are ordinary JSON objects.

use serde_json::{Value, json};

/// `{"Ref": logical_id}`: the resource's primary identifier.
#[must_use]
pub fn get_ref(logical_id: &str) -> Value {
    json!({ "Ref": logical_id })
}

/// `{"Fn::GetAtt": [logical_id, attribute]}`: a resource attribute.
#[must_use]
pub fn get_att(logical_id: &str, attribute: &str) -> Value {
    json!({ "Fn::GetAtt": [logical_id, attribute] })
}

/// `{"Fn::Join": [delimiter, parts]}`.
///
/// `parts` may be a JSON array of values or another intrinsic that resolves
/// to a list (e.g. a hosted zone's name servers).
#[must_use]
pub fn join(delimiter: &str, parts: Value) -> Value {
    json!({ "Fn::Join": [delimiter, parts] })
}

/// `{"Fn::Sub": template}`: string substitution over `${...}` references.
#[must_use]
pub fn sub(template: &str) -> Value {
    json!({ "Fn::Sub": template })
}
