//! Lambda function construct for inline-code functions.
//!
//! Every function in this library ships its handler as inline code in the
//! template (`Code.ZipFile`); packaged assets are the deployment CLI's
//! concern and out of scope.

use serde_json::{Value, json};
use tracing::debug;

use dxstack_core::intrinsics::{get_att, get_ref};
use dxstack_core::{DxStackError, DxStackResult, RemovalPolicy, Resource, Stack};

use crate::profile::{FunctionOverrides, FunctionProfile, resolve};

/// Properties for a [`Function`].
#[derive(Debug, Clone)]
pub struct FunctionProps {
    /// Sizing profile.
    pub profile: FunctionProfile,
    /// Sizing overrides; set fields replace the profile value outright.
    pub overrides: FunctionOverrides,
    /// Handler entry point, e.g. `index.handler`.
    pub handler: String,
    /// Execution role ARN (literal or intrinsic).
    pub role: Value,
    /// Inline source for the handler.
    pub inline_code: String,
    /// Optional description.
    pub description: Option<String>,
    /// Removal policy applied to the function (and its version, if any).
    pub removal_policy: Option<RemovalPolicy>,
    /// Publish an immutable version alongside the function. Required for
    /// edge association, which must point at a version ARN.
    pub publish: bool,
}

impl FunctionProps {
    /// Props for an inline-code function with profile defaults.
    #[must_use]
    pub fn inline(
        profile: FunctionProfile,
        handler: impl Into<String>,
        role: Value,
        inline_code: impl Into<String>,
    ) -> Self {
        Self {
            profile,
            overrides: FunctionOverrides::default(),
            handler: handler.into(),
            role,
            inline_code: inline_code.into(),
            description: None,
            removal_policy: None,
            publish: false,
        }
    }
}

/// An `AWS::Lambda::Function` (plus optional published version) in a stack.
#[derive(Debug)]
pub struct Function {
    logical_id: String,
    version_logical_id: Option<String>,
}

impl Function {
    /// Add a function to the stack.
    ///
    /// # Errors
    /// Fails on an empty handler or empty inline code, or on a logical ID
    /// collision.
    pub fn new(stack: &mut Stack, id: &str, props: FunctionProps) -> DxStackResult<Self> {
        if props.handler.trim().is_empty() {
            return Err(DxStackError::InvalidInput(
                "function handler cannot be empty".to_owned(),
            ));
        }
        if props.inline_code.trim().is_empty() {
            return Err(DxStackError::InvalidInput(
                "function inline code cannot be empty".to_owned(),
            ));
        }

        let config = resolve(props.profile, &props.overrides);
        debug!(profile = %props.profile, ?config, "resolved function configuration");

        let mut properties = json!({
            "Runtime": config.runtime.as_str(),
            "Handler": props.handler,
            "Role": props.role,
            "MemorySize": config.memory_size,
            "Timeout": config.timeout.as_secs(),
            "Code": { "ZipFile": props.inline_code },
        });
        if let Some(description) = &props.description {
            properties["Description"] = json!(description);
        }

        let mut resource = Resource::new("AWS::Lambda::Function", properties);
        if let Some(policy) = props.removal_policy {
            resource = resource.with_removal_policy(policy);
        }
        let logical_id = stack.add_resource(id, resource)?;

        let version_logical_id = if props.publish {
            let mut version = Resource::new(
                "AWS::Lambda::Version",
                json!({ "FunctionName": get_ref(&logical_id) }),
            );
            if let Some(policy) = props.removal_policy {
                version = version.with_removal_policy(policy);
            }
            Some(stack.add_resource(&format!("{id}Version"), version)?)
        } else {
            None
        };

        Ok(Self {
            logical_id,
            version_logical_id,
        })
    }

    /// The function's logical ID within its stack.
    #[must_use]
    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    /// Intrinsic resolving to the function ARN.
    #[must_use]
    pub fn arn(&self) -> Value {
        get_att(&self.logical_id, "Arn")
    }

    /// Intrinsic resolving to the published version's ARN, if one exists.
    #[must_use]
    pub fn version_arn(&self) -> Option<Value> {
        self.version_logical_id.as_deref().map(get_ref)
    }
}

#[cfg(test)]
mod tests {
    use dxstack_core::StackEnv;

    use super::*;

    fn stack() -> Stack {
        Stack::new("FnStack", StackEnv::default()).unwrap()
    }

    #[test]
    fn test_should_emit_function_with_profile_sizing() {
        let mut stack = stack();
        let props = FunctionProps::inline(
            FunctionProfile::Edge,
            "index.handler",
            json!("arn:aws:iam::000000000000:role/edge"),
            "exports.handler = async () => {};",
        );
        let function = Function::new(&mut stack, "Rewrite", props).unwrap();

        let template = stack.to_value().unwrap();
        let properties = &template["Resources"]["Rewrite"]["Properties"];
        assert_eq!(properties["Runtime"], "nodejs22.x");
        assert_eq!(properties["MemorySize"], 128);
        assert_eq!(properties["Timeout"], 5);
        assert!(properties["Code"]["ZipFile"]
            .as_str()
            .unwrap()
            .contains("exports.handler"));
        assert!(function.version_arn().is_none());
    }

    #[test]
    fn test_should_publish_version_with_removal_policy() {
        let mut stack = stack();
        let mut props = FunctionProps::inline(
            FunctionProfile::Edge,
            "index.handler",
            json!("arn:aws:iam::000000000000:role/edge"),
            "exports.handler = async () => {};",
        );
        props.publish = true;
        props.removal_policy = Some(RemovalPolicy::Destroy);

        let function = Function::new(&mut stack, "Auth", props).unwrap();
        assert_eq!(
            function.version_arn().unwrap(),
            json!({"Ref": "AuthVersion"})
        );

        let template = stack.to_value().unwrap();
        assert_eq!(template["Resources"]["Auth"]["DeletionPolicy"], "Delete");
        let version = &template["Resources"]["AuthVersion"];
        assert_eq!(version["Type"], "AWS::Lambda::Version");
        assert_eq!(version["Properties"]["FunctionName"]["Ref"], "Auth");
        assert_eq!(version["DeletionPolicy"], "Delete");
    }

    #[test]
    fn test_should_reject_empty_handler() {
        let mut stack = stack();
        let props = FunctionProps::inline(
            FunctionProfile::Tiny,
            "  ",
            json!("arn:aws:iam::000000000000:role/r"),
            "code",
        );
        assert!(matches!(
            Function::new(&mut stack, "Bad", props),
            Err(DxStackError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_should_apply_overrides() {
        let mut stack = stack();
        let mut props = FunctionProps::inline(
            FunctionProfile::Small,
            "index.handler",
            json!("arn:aws:iam::000000000000:role/r"),
            "code",
        );
        props.overrides.memory_size = Some(512);

        Function::new(&mut stack, "Sized", props).unwrap();
        let template = stack.to_value().unwrap();
        let properties = &template["Resources"]["Sized"]["Properties"];
        assert_eq!(properties["MemorySize"], 512);
        // Timeout still comes from the small profile.
        assert_eq!(properties["Timeout"], 10);
    }
}
