//! IAM role construct.

use serde_json::{Value, json};
use tracing::debug;

use dxstack_core::intrinsics::get_att;
use dxstack_core::{DxStackResult, Resource, Stack};

use crate::policy::PolicyDocument;

/// Properties for a [`Role`].
#[derive(Debug, Clone)]
pub struct RoleProps {
    /// Explicit role name; omitted, the provisioning engine generates one.
    pub role_name: Option<String>,
    /// Human-readable description.
    pub description: Option<String>,
    /// Trust document controlling who may assume the role.
    pub assume_role_policy: PolicyDocument,
    /// Inline policies, as `(policy name, document)` pairs.
    pub policies: Vec<(String, PolicyDocument)>,
    /// Managed policy ARNs to attach.
    pub managed_policy_arns: Vec<String>,
}

impl RoleProps {
    /// Props with only a trust document; policies can be layered on.
    #[must_use]
    pub fn assumed_by(assume_role_policy: PolicyDocument) -> Self {
        Self {
            role_name: None,
            description: None,
            assume_role_policy,
            policies: Vec::new(),
            managed_policy_arns: Vec::new(),
        }
    }

    /// Attach an inline policy.
    #[must_use]
    pub fn with_policy(mut self, name: impl Into<String>, document: PolicyDocument) -> Self {
        self.policies.push((name.into(), document));
        self
    }

    /// Attach a managed policy by ARN.
    #[must_use]
    pub fn with_managed_policy(mut self, arn: impl Into<String>) -> Self {
        self.managed_policy_arns.push(arn.into());
        self
    }

    /// Set an explicit role name.
    #[must_use]
    pub fn named(mut self, role_name: impl Into<String>) -> Self {
        self.role_name = Some(role_name.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An `AWS::IAM::Role` added to a stack.
#[derive(Debug)]
pub struct Role {
    logical_id: String,
}

impl Role {
    /// Add a role to the stack.
    ///
    /// # Errors
    /// Fails if the logical ID collides with an existing resource.
    pub fn new(stack: &mut Stack, id: &str, props: RoleProps) -> DxStackResult<Self> {
        let assume_role_document = serde_json::to_value(&props.assume_role_policy)
            .map_err(anyhow::Error::from)?;
        let mut properties = json!({
            "AssumeRolePolicyDocument": assume_role_document,
        });

        if let Some(name) = &props.role_name {
            properties["RoleName"] = json!(name);
        }
        if let Some(description) = &props.description {
            properties["Description"] = json!(description);
        }
        if !props.policies.is_empty() {
            let policies: Vec<Value> = props
                .policies
                .iter()
                .map(|(name, doc)| {
                    let document = serde_json::to_value(doc).map_err(anyhow::Error::from)?;
                    Ok(json!({ "PolicyName": name, "PolicyDocument": document }))
                })
                .collect::<DxStackResult<_>>()?;
            properties["Policies"] = Value::Array(policies);
        }
        if !props.managed_policy_arns.is_empty() {
            properties["ManagedPolicyArns"] = json!(props.managed_policy_arns);
        }

        let logical_id =
            stack.add_resource(id, Resource::new("AWS::IAM::Role", properties))?;
        debug!(role = %logical_id, "added IAM role");
        Ok(Self { logical_id })
    }

    /// The role's logical ID within its stack.
    #[must_use]
    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    /// Intrinsic resolving to the role ARN.
    #[must_use]
    pub fn arn(&self) -> Value {
        get_att(&self.logical_id, "Arn")
    }
}
