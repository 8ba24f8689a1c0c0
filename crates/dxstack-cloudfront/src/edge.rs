//! Lambda@Edge functions for the default behavior.
//!
//! Edge functions must be published versions, and both the function and
//! its version carry a Destroy removal policy: the CDN replicates them to
//! edge locations, and retained edge functions block stack deletion for
//! hours while replicas drain.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;
use tracing::debug;

use dxstack_core::{DxStackError, DxStackResult, RemovalPolicy, Stack};
use dxstack_iam::{PolicyDocument, Role, RoleProps};
use dxstack_lambda::{Function, FunctionProfile, FunctionProps};

use crate::distribution::EdgeAssociation;

/// Inline viewer-request handler that normalizes directory-style URLs:
/// extensionless paths get a trailing slash (301), and directory requests
/// are rewritten to their `index.html`.
const URL_REWRITE_HANDLER: &str = r"
exports.handler = async (event) => {
    const request = event.Records[0].cf.request;
    const uri = request.uri;

    // Always add a trailing slash to directory-like requests
    if (!uri.includes('.') && uri.slice(-1) !== '/') {
        return {
            status: '301',
            statusDescription: 'Moved Permanently',
            headers: {
                'location': [{
                    key: 'Location',
                    value: uri + '/'
                }],
            }
        };
    }

    // Append index.html to directory requests
    if (uri.slice(-1) === '/') {
        request.uri += 'index.html';
    }

    return request;
};
";

/// A published edge function rewriting directory URLs to `index.html`.
#[derive(Debug)]
pub struct UrlRewriteEdge {
    function: Function,
}

impl UrlRewriteEdge {
    /// Add the rewrite function (role, function, version) to the stack.
    ///
    /// # Errors
    /// Fails on logical ID collisions.
    pub fn new(stack: &mut Stack, id: &str) -> DxStackResult<Self> {
        let function = edge_function(stack, id, URL_REWRITE_HANDLER.to_owned())?;
        Ok(Self { function })
    }

    /// Association handle for a distribution's default behavior.
    #[must_use]
    pub fn association(&self) -> EdgeAssociation {
        EdgeAssociation::viewer_request(published_version_arn(&self.function))
    }
}

/// Properties for a [`BasicAuthEdge`].
#[derive(Debug, Clone)]
pub struct BasicAuthEdgeProps {
    /// Expected user name.
    pub username: String,
    /// Expected password.
    pub password: String,
}

/// A published edge function enforcing HTTP basic authentication.
///
/// The credential pair is encoded at synthesis time and baked into the
/// handler, so the function itself does no crypto at the edge.
#[derive(Debug)]
pub struct BasicAuthEdge {
    function: Function,
}

impl BasicAuthEdge {
    /// Add the auth function (role, function, version) to the stack.
    ///
    /// # Errors
    /// Fails on empty credentials or logical ID collisions.
    pub fn new(stack: &mut Stack, id: &str, props: BasicAuthEdgeProps) -> DxStackResult<Self> {
        if props.username.is_empty() || props.password.is_empty() {
            return Err(DxStackError::InvalidInput(
                "basic auth username and password are required and cannot be empty".to_owned(),
            ));
        }
        let credential = BASE64.encode(format!("{}:{}", props.username, props.password));
        debug!(function = %id, "baking basic auth credential into edge handler");

        let code = format!(
            r#"
exports.handler = async (event) => {{
    const request = event.Records[0].cf.request;
    const expected = "Basic {credential}";

    const headers = request.headers;
    if (!headers.authorization || headers.authorization[0].value !== expected) {{
        return {{
            status: '401',
            statusDescription: 'Unauthorized',
            headers: {{
                'www-authenticate': [{{
                    key: 'WWW-Authenticate',
                    value: 'Basic'
                }}]
            }}
        }};
    }}

    return request;
}};
"#
        );
        let function = edge_function(stack, id, code)?;
        Ok(Self { function })
    }

    /// Association handle for a distribution's default behavior.
    #[must_use]
    pub fn association(&self) -> EdgeAssociation {
        EdgeAssociation::viewer_request(published_version_arn(&self.function))
    }
}

/// Shared scaffolding: execution role trusted by both Lambda services,
/// Edge-profile function, published version, Destroy removal throughout.
fn edge_function(stack: &mut Stack, id: &str, code: String) -> DxStackResult<Function> {
    let role = Role::new(
        stack,
        &format!("{id}Role"),
        RoleProps::assumed_by(PolicyDocument::edge_lambda_assume_role()).with_managed_policy(
            "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole",
        ),
    )?;

    let mut props = FunctionProps::inline(FunctionProfile::Edge, "index.handler", role.arn(), code);
    props.publish = true;
    props.removal_policy = Some(RemovalPolicy::Destroy);
    Function::new(stack, id, props)
}

/// The version ARN every edge association needs. Publishing is forced by
/// [`edge_function`], so the version always exists.
fn published_version_arn(function: &Function) -> Value {
    function
        .version_arn()
        .unwrap_or_else(|| function.arn())
}
