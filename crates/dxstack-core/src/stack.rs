//! Stack: the mutable resource registry constructs attach to.
//!
//! A [`Stack`] owns one [`Template`] plus the environment (account, region)
//! it targets. Constructs add resources under sanitized logical IDs and may
//! declare outputs; [`Stack::synth`] serializes the finished template for
//! the provisioning engine.

use serde_json::Value;
use tracing::{debug, info};

use crate::error::{DxStackError, DxStackResult};
use crate::template::{Output, Resource, Template};
use crate::types::{AccountId, AwsRegion};

/// Maximum stack name length accepted by the provisioning engine.
const MAX_STACK_NAME_LEN: usize = 128;

/// The account and region a stack is synthesized for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackEnv {
    /// Target AWS account.
    pub account: AccountId,
    /// Target AWS region.
    pub region: AwsRegion,
}

/// A named collection of resources and outputs targeting one environment.
#[derive(Debug)]
pub struct Stack {
    name: String,
    env: StackEnv,
    template: Template,
}

impl Stack {
    /// Create an empty stack.
    ///
    /// # Errors
    /// Returns [`DxStackError::InvalidStackName`] if the name is not
    /// alphanumeric-plus-hyphens, does not start with a letter, or exceeds
    /// 128 characters.
    pub fn new(name: impl Into<String>, env: StackEnv) -> DxStackResult<Self> {
        let name = name.into();
        validate_stack_name(&name)?;
        Ok(Self {
            name,
            env,
            template: Template::default(),
        })
    }

    /// The stack name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The environment this stack targets.
    #[must_use]
    pub fn env(&self) -> &StackEnv {
        &self.env
    }

    /// The template built so far.
    #[must_use]
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Add a resource under a sanitized logical ID and return that ID.
    ///
    /// The ID is derived from `logical_id` by dropping every character that
    /// is not ASCII alphanumeric.
    ///
    /// # Errors
    /// Returns [`DxStackError::DuplicateLogicalId`] if the sanitized ID is
    /// already taken, and [`DxStackError::InvalidInput`] if nothing is left
    /// of the ID after sanitization.
    pub fn add_resource(
        &mut self,
        logical_id: &str,
        resource: Resource,
    ) -> DxStackResult<String> {
        let id = sanitize_logical_id(logical_id);
        if id.is_empty() {
            return Err(DxStackError::InvalidInput(format!(
                "logical ID {logical_id:?} contains no alphanumeric characters"
            )));
        }
        if self.template.resources.contains_key(&id) {
            return Err(DxStackError::DuplicateLogicalId(id));
        }
        debug!(stack = %self.name, logical_id = %id, resource_type = %resource.resource_type, "adding resource");
        self.template.resources.insert(id.clone(), resource);
        Ok(id)
    }

    /// Mutable access to a previously added resource.
    ///
    /// Used by constructs that accumulate into one resource, such as a
    /// bucket's resource policy.
    #[must_use]
    pub fn resource_mut(&mut self, logical_id: &str) -> Option<&mut Resource> {
        self.template.resources.get_mut(logical_id)
    }

    /// Declare a stack output.
    ///
    /// # Errors
    /// Returns [`DxStackError::DuplicateLogicalId`] if an output with the
    /// same name already exists.
    pub fn add_output(&mut self, name: &str, output: Output) -> DxStackResult<()> {
        let id = sanitize_logical_id(name);
        if id.is_empty() {
            return Err(DxStackError::InvalidInput(format!(
                "output name {name:?} contains no alphanumeric characters"
            )));
        }
        if self.template.outputs.contains_key(&id) {
            return Err(DxStackError::DuplicateLogicalId(id));
        }
        self.template.outputs.insert(id, output);
        Ok(())
    }

    /// Serialize the template as pretty-printed JSON.
    ///
    /// Pretty output keeps the template readable when inspected in the
    /// provisioning engine's console.
    pub fn synth(&self) -> DxStackResult<String> {
        let body = serde_json::to_string_pretty(&self.template)
            .map_err(|e| DxStackError::Internal(e.into()))?;
        info!(
            stack = %self.name,
            resources = self.template.resources.len(),
            outputs = self.template.outputs.len(),
            "synthesized template"
        );
        Ok(body)
    }

    /// The template as a `serde_json::Value`, for assertions and tooling.
    pub fn to_value(&self) -> DxStackResult<Value> {
        serde_json::to_value(&self.template).map_err(|e| DxStackError::Internal(e.into()))
    }
}

/// Validate a stack name against the provisioning engine's rules:
/// alphanumeric characters and hyphens only, starting with a letter, at
/// most 128 characters.
fn validate_stack_name(name: &str) -> DxStackResult<()> {
    let reject = |reason: &str| {
        Err(DxStackError::InvalidStackName {
            name: name.to_owned(),
            reason: reason.to_owned(),
        })
    };

    if name.is_empty() {
        return reject("name is empty");
    }
    if name.len() > MAX_STACK_NAME_LEN {
        return reject("name is longer than 128 characters");
    }
    if !name.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return reject("name must start with an alphabetical character");
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return reject("name must only contain alphanumeric characters and hyphens");
    }
    Ok(())
}

/// Reduce an arbitrary construct ID to a CloudFormation logical ID by
/// keeping only ASCII alphanumeric characters.
#[must_use]
pub fn sanitize_logical_id(id: &str) -> String {
    id.chars().filter(char::is_ascii_alphanumeric).collect()
}
