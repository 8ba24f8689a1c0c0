//! Serde model of a CloudFormation template.
//!
//! This is the boundary to the external resource-provisioning engine: a
//! construct's only observable effect is the resources and outputs it adds
//! to a [`Template`]. `BTreeMap`s keep synthesis deterministic so templates
//! diff cleanly between runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::RemovalPolicy;

/// CloudFormation template format version emitted by every stack.
pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

/// A complete CloudFormation template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    /// Template format version.
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,
    /// Resources keyed by logical ID.
    #[serde(rename = "Resources")]
    pub resources: BTreeMap<String, Resource>,
    /// Stack outputs keyed by output name.
    #[serde(rename = "Outputs", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, Output>,
}

impl Default for Template {
    fn default() -> Self {
        Self {
            format_version: TEMPLATE_FORMAT_VERSION.to_owned(),
            resources: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }
}

/// A single resource declaration within a template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// CloudFormation resource type, e.g. `AWS::S3::Bucket`.
    #[serde(rename = "Type")]
    pub resource_type: String,
    /// Resource properties, in the wire shape the resource type expects.
    #[serde(rename = "Properties")]
    pub properties: Value,
    /// What happens to the live resource when it leaves the template.
    #[serde(
        rename = "DeletionPolicy",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub deletion_policy: Option<DeletionPolicy>,
    /// Policy applied when an update requires replacement.
    #[serde(
        rename = "UpdateReplacePolicy",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub update_replace_policy: Option<DeletionPolicy>,
    /// Logical IDs this resource explicitly depends on.
    #[serde(rename = "DependsOn", default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

impl Resource {
    /// Create a resource of the given type with the given properties.
    #[must_use]
    pub fn new(resource_type: impl Into<String>, properties: Value) -> Self {
        Self {
            resource_type: resource_type.into(),
            properties,
            deletion_policy: None,
            update_replace_policy: None,
            depends_on: Vec::new(),
        }
    }

    /// Apply a removal policy, setting both the deletion and the
    /// update-replace policy the way the provisioning engine expects.
    #[must_use]
    pub fn with_removal_policy(mut self, policy: RemovalPolicy) -> Self {
        let deletion = DeletionPolicy::from(policy);
        self.deletion_policy = Some(deletion);
        self.update_replace_policy = Some(deletion);
        self
    }

    /// Add an explicit dependency on another logical ID.
    #[must_use]
    pub fn depends_on(mut self, logical_id: impl Into<String>) -> Self {
        self.depends_on.push(logical_id.into());
        self
    }
}

/// Wire form of a resource deletion policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeletionPolicy {
    /// Keep the live resource.
    Retain,
    /// Delete the live resource.
    Delete,
    /// Snapshot before deleting.
    Snapshot,
}

impl From<RemovalPolicy> for DeletionPolicy {
    fn from(policy: RemovalPolicy) -> Self {
        match policy {
            RemovalPolicy::Retain => Self::Retain,
            RemovalPolicy::Destroy => Self::Delete,
            RemovalPolicy::Snapshot => Self::Snapshot,
        }
    }
}

/// A stack output, optionally exported for cross-stack references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    /// Human-readable description.
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Output value; usually an intrinsic referencing a resource.
    #[serde(rename = "Value")]
    pub value: Value,
    /// Export declaration making the output importable by other stacks.
    #[serde(rename = "Export", default, skip_serializing_if = "Option::is_none")]
    pub export: Option<Export>,
}

impl Output {
    /// Create an output with a description.
    #[must_use]
    pub fn new(value: Value, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            value,
            export: None,
        }
    }

    /// Export the output under the given name.
    #[must_use]
    pub fn exported_as(mut self, name: impl Into<String>) -> Self {
        self.export = Some(Export { name: name.into() });
        self
    }
}

/// Cross-stack export name for an output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Export {
    /// The globally unique export name.
    #[serde(rename = "Name")]
    pub name: String,
}
