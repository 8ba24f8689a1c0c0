//! IAM policy document model.
//!
//! Serializes to the JSON policy shape the provisioning engine embeds in
//! `AWS::IAM::Role` and `AWS::S3::BucketPolicy` resources. Statements are
//! assembled with chained builder methods; resources may be literal ARNs or
//! intrinsics.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Policy language version used by every document.
pub const POLICY_VERSION: &str = "2012-10-17";

/// Whether a statement allows or denies its actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Grant the listed actions.
    Allow,
    /// Deny the listed actions.
    Deny,
}

/// A single policy statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyStatement {
    /// Allow or deny.
    #[serde(rename = "Effect")]
    pub effect: Effect,
    /// Actions the statement covers.
    #[serde(rename = "Action")]
    pub actions: Vec<String>,
    /// Resources the statement applies to; omitted for assume-role
    /// statements, which bind to the role they are attached to.
    #[serde(rename = "Resource", default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Value>,
    /// Principals the statement applies to.
    #[serde(rename = "Principal", default, skip_serializing_if = "Option::is_none")]
    pub principal: Option<Value>,
    /// Condition block.
    #[serde(rename = "Condition", default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Value>,
}

impl PolicyStatement {
    /// Start an `Allow` statement.
    #[must_use]
    pub fn allow() -> Self {
        Self::new(Effect::Allow)
    }

    /// Start a statement with the given effect.
    #[must_use]
    pub fn new(effect: Effect) -> Self {
        Self {
            effect,
            actions: Vec::new(),
            resources: Vec::new(),
            principal: None,
            condition: None,
        }
    }

    /// Add a single action.
    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.actions.push(action.into());
        self
    }

    /// Add several actions.
    #[must_use]
    pub fn actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions.extend(actions.into_iter().map(Into::into));
        self
    }

    /// Add a resource (literal ARN string or intrinsic).
    #[must_use]
    pub fn resource(mut self, resource: Value) -> Self {
        self.resources.push(resource);
        self
    }

    /// Bind the statement to an AWS service principal.
    #[must_use]
    pub fn service_principal(mut self, service: &str) -> Self {
        self.principal = Some(json!({ "Service": service }));
        self
    }

    /// Bind the statement to every AWS principal; pair with a condition.
    #[must_use]
    pub fn any_principal(mut self) -> Self {
        self.principal = Some(json!({ "AWS": "*" }));
        self
    }

    /// Add a condition operator block, e.g.
    /// `condition("StringEquals", json!({"aws:PrincipalOrgID": org_id}))`.
    #[must_use]
    pub fn condition(mut self, operator: &str, matchers: Value) -> Self {
        let block = self
            .condition
            .get_or_insert_with(|| json!({}));
        block[operator] = matchers;
        self
    }
}

/// A versioned collection of statements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyDocument {
    /// Policy language version.
    #[serde(rename = "Version")]
    pub version: String,
    /// The statements.
    #[serde(rename = "Statement")]
    pub statements: Vec<PolicyStatement>,
}

impl PolicyDocument {
    /// A document containing the given statements.
    #[must_use]
    pub fn new(statements: Vec<PolicyStatement>) -> Self {
        Self {
            version: POLICY_VERSION.to_owned(),
            statements,
        }
    }

    /// The trust document letting an AWS service assume a role.
    #[must_use]
    pub fn assume_role_for_service(service: &str) -> Self {
        Self::new(vec![
            PolicyStatement::allow()
                .action("sts:AssumeRole")
                .service_principal(service),
        ])
    }

    /// The trust document for Lambda execution roles.
    #[must_use]
    pub fn lambda_assume_role() -> Self {
        Self::assume_role_for_service("lambda.amazonaws.com")
    }

    /// The trust document for Lambda@Edge execution roles; the edge
    /// replication service must also be able to assume the role.
    #[must_use]
    pub fn edge_lambda_assume_role() -> Self {
        let mut statement = PolicyStatement::allow().action("sts:AssumeRole");
        statement.principal = Some(json!({
            "Service": ["lambda.amazonaws.com", "edgelambda.amazonaws.com"]
        }));
        Self::new(vec![statement])
    }
}
