//! Namespaced parameter store construct.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use dxstack_core::{DxStackError, DxStackResult, Resource, Stack, sanitize_logical_id};

/// A single parameter's value and metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterValue {
    /// The stored value.
    pub value: String,
    /// Description; defaulted when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Marks values that should be stored encrypted. Encrypted parameters
    /// cannot be created through the declarative API, so flagged entries
    /// are validated but must be provisioned out of band.
    #[serde(default)]
    pub secure: bool,
}

impl ParameterValue {
    /// A plain parameter value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: None,
            secure: false,
        }
    }
}

/// Properties for a [`ParameterSet`].
#[derive(Debug, Clone)]
pub struct ParameterSetProps {
    /// System namespace every parameter lands under: `/{system}/{name}`.
    pub system: String,
    /// Parameters keyed by name.
    pub parameters: BTreeMap<String, ParameterValue>,
}

/// A set of string parameters under one system namespace.
#[derive(Debug)]
pub struct ParameterSet {
    system: String,
    parameters: BTreeMap<String, ParameterValue>,
}

impl ParameterSet {
    /// Add one `AWS::SSM::Parameter` per entry to the stack.
    ///
    /// # Errors
    /// Fails when the system name is empty, when no parameters are given,
    /// when any name or value is empty, or on logical ID collisions.
    pub fn new(stack: &mut Stack, id: &str, props: ParameterSetProps) -> DxStackResult<Self> {
        if props.system.trim().is_empty() {
            return Err(DxStackError::InvalidInput(
                "system name is required and cannot be empty".to_owned(),
            ));
        }
        if props.parameters.is_empty() {
            return Err(DxStackError::InvalidInput(
                "at least one parameter is required".to_owned(),
            ));
        }
        for (name, parameter) in &props.parameters {
            if name.trim().is_empty() {
                return Err(DxStackError::InvalidInput(
                    "parameter name cannot be empty".to_owned(),
                ));
            }
            if parameter.value.trim().is_empty() {
                return Err(DxStackError::InvalidInput(format!(
                    "value for parameter {name} cannot be empty"
                )));
            }
        }

        let system = props.system;
        for (name, parameter) in &props.parameters {
            if parameter.secure {
                // Validated above but not emitted; see ParameterValue::secure.
                debug!(parameter = %name, "skipping secure parameter");
                continue;
            }
            let description = parameter
                .description
                .clone()
                .unwrap_or_else(|| format!("Created by the {system} stack"));
            stack.add_resource(
                &format!("{id}Parameter{}", sanitize_logical_id(name)),
                Resource::new(
                    "AWS::SSM::Parameter",
                    json!({
                        "Name": format!("/{system}/{name}"),
                        "Type": "String",
                        "Value": parameter.value,
                        "Description": description,
                    }),
                ),
            )?;
        }
        debug!(system = %system, count = props.parameters.len(), "added parameter set");

        Ok(Self {
            system,
            parameters: props.parameters,
        })
    }

    /// The system namespace.
    #[must_use]
    pub fn system(&self) -> &str {
        &self.system
    }

    /// Every parameter name in the set.
    #[must_use]
    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.keys().map(String::as_str).collect()
    }

    /// The stored value of a parameter.
    ///
    /// # Errors
    /// Fails when the name is not part of the set.
    pub fn value_of(&self, name: &str) -> DxStackResult<&str> {
        self.parameters
            .get(name)
            .map(|p| p.value.as_str())
            .ok_or_else(|| self.unknown(name))
    }

    /// The full store path of a parameter: `/{system}/{name}`.
    ///
    /// # Errors
    /// Fails when the name is not part of the set.
    pub fn parameter_path(&self, name: &str) -> DxStackResult<String> {
        if !self.parameters.contains_key(name) {
            return Err(self.unknown(name));
        }
        Ok(format!("/{}/{name}", self.system))
    }

    fn unknown(&self, name: &str) -> DxStackError {
        DxStackError::InvalidInput(format!(
            "parameter {name} not found in system {}",
            self.system
        ))
    }
}
