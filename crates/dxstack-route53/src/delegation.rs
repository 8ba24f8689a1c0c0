//! Cross-account DNS delegation.
//!
//! Two halves of one contract. [`DelegationRole`] runs in the account that
//! owns the root domain: it provisions the conventionally named role that
//! organization members may assume to edit the root zone. [`ZoneDelegation`]
//! runs in a member account: it derives that role's ARN from the subdomain
//! name alone and writes the NS delegation record through it.

use serde_json::json;
use tracing::debug;

use dxstack_core::{AccountId, Duration, DxStackError, DxStackResult, Resource, Stack};
use dxstack_iam::{PolicyDocument, PolicyStatement, Role, RoleProps};
use dxstack_lambda::{Function, FunctionProfile, FunctionProps};

use crate::domain::{delegation_role_arn, delegation_role_name, root_domain};
use crate::zone::SubdomainZone;

/// Inline handler that assumes the delegation role in the parent account
/// and upserts (or deletes) the subdomain's NS record in the root zone.
const DELEGATION_HANDLER: &str = r"
const { STSClient, AssumeRoleCommand } = require('@aws-sdk/client-sts');
const { Route53Client, ChangeResourceRecordSetsCommand } = require('@aws-sdk/client-route-53');
const response = require('cfn-response');

exports.handler = async (event, context) => {
    let status = response.SUCCESS;
    try {
        const props = event.ResourceProperties;
        const sts = new STSClient({});
        const assumed = await sts.send(new AssumeRoleCommand({
            RoleArn: props.AssumeRoleArn,
            RoleSessionName: 'zone-delegation',
        }));
        const client = new Route53Client({
            credentials: {
                accessKeyId: assumed.Credentials.AccessKeyId,
                secretAccessKey: assumed.Credentials.SecretAccessKey,
                sessionToken: assumed.Credentials.SessionToken,
            },
        });
        const action = event.RequestType === 'Delete' ? 'DELETE' : 'UPSERT';
        await client.send(new ChangeResourceRecordSetsCommand({
            HostedZoneId: props.ParentZoneId,
            ChangeBatch: {
                Changes: [{
                    Action: action,
                    ResourceRecordSet: {
                        Name: props.DelegatedZoneName,
                        Type: 'NS',
                        TTL: Number(props.Ttl),
                        ResourceRecords: props.NameServers.map((ns) => ({ Value: ns })),
                    },
                }],
            },
        }));
    } catch (err) {
        console.error('delegation change failed', err);
        status = response.FAILED;
    }
    await response.send(event, context, status);
};
";

/// Properties for a [`ZoneDelegation`].
#[derive(Debug, Clone)]
pub struct ZoneDelegationProps {
    /// Account ID of the parent account, where the root domain is
    /// provisioned and the delegation role lives.
    pub root_account_id: AccountId,
    /// Hosted zone ID of the root domain in the parent account.
    pub parent_hosted_zone_id: String,
    /// TTL of the NS delegation record.
    pub ttl: Duration,
}

impl ZoneDelegationProps {
    /// Props with the default five-minute record TTL.
    #[must_use]
    pub fn new(root_account_id: AccountId, parent_hosted_zone_id: impl Into<String>) -> Self {
        Self {
            root_account_id,
            parent_hosted_zone_id: parent_hosted_zone_id.into(),
            ttl: Duration::SHORT,
        }
    }
}

/// The NS delegation record for a subdomain zone, written into the parent
/// account's root zone through the conventional delegation role.
#[derive(Debug)]
pub struct ZoneDelegation {
    logical_id: String,
    delegation_role_arn: String,
}

impl ZoneDelegation {
    /// Wire the delegation for `zone` into the stack.
    ///
    /// Taking the [`SubdomainZone`] by reference makes the ordering
    /// constraint structural: the zone exists before its delegation.
    ///
    /// # Errors
    /// Fails when the zone name cannot yield a root domain, when the
    /// parent zone ID is empty, or on logical ID collisions.
    pub fn new(
        stack: &mut Stack,
        id: &str,
        zone: &SubdomainZone,
        props: ZoneDelegationProps,
    ) -> DxStackResult<Self> {
        if props.parent_hosted_zone_id.trim().is_empty() {
            return Err(DxStackError::InvalidInput(
                "parent hosted zone ID is required and cannot be empty".to_owned(),
            ));
        }

        let root = root_domain(zone.zone_name())?;
        let role_arn = delegation_role_arn(&props.root_account_id, &root);
        debug!(zone = %zone.zone_name(), root_domain = %root, role_arn = %role_arn, "delegating subdomain");

        let handler_policy = PolicyDocument::new(vec![
            PolicyStatement::allow()
                .action("sts:AssumeRole")
                .resource(json!(role_arn.clone())),
        ]);
        let handler_role = Role::new(
            stack,
            &format!("{id}HandlerRole"),
            RoleProps::assumed_by(PolicyDocument::lambda_assume_role())
                .with_policy("assume-delegation-role", handler_policy)
                .with_managed_policy(
                    "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole",
                ),
        )?;

        let handler = Function::new(
            stack,
            &format!("{id}Handler"),
            FunctionProps::inline(
                FunctionProfile::Small,
                "index.handler",
                handler_role.arn(),
                DELEGATION_HANDLER,
            ),
        )?;

        let logical_id = stack.add_resource(
            id,
            Resource::new(
                "Custom::CrossAccountZoneDelegation",
                json!({
                    "ServiceToken": handler.arn(),
                    "AssumeRoleArn": role_arn,
                    "ParentZoneId": props.parent_hosted_zone_id,
                    "DelegatedZoneName": zone.zone_name(),
                    "NameServers": zone.name_servers(),
                    "Ttl": props.ttl.as_secs(),
                }),
            ),
        )?;

        Ok(Self {
            logical_id,
            delegation_role_arn: role_arn,
        })
    }

    /// The delegation resource's logical ID.
    #[must_use]
    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    /// The derived ARN of the delegation role in the parent account.
    #[must_use]
    pub fn delegation_role_arn(&self) -> &str {
        &self.delegation_role_arn
    }
}

/// Properties for a [`DelegationRole`].
#[derive(Debug, Clone)]
pub struct DelegationRoleProps {
    /// The AWS organization whose member accounts may assume the role.
    pub organization_id: String,
    /// The root domain this role grants record access to.
    pub root_domain_name: String,
    /// Hosted zone ID of the root domain.
    pub hosted_zone_id: String,
}

/// The root-account side of cross-account delegation: the conventionally
/// named role that lets organization accounts edit the root zone's records.
#[derive(Debug)]
pub struct DelegationRole {
    role: Role,
    role_name: String,
}

impl DelegationRole {
    /// Add the delegation role to the (root account's) stack.
    ///
    /// # Errors
    /// Fails on empty inputs or logical ID collisions.
    pub fn new(stack: &mut Stack, id: &str, props: DelegationRoleProps) -> DxStackResult<Self> {
        if props.organization_id.trim().is_empty() {
            return Err(DxStackError::InvalidInput(
                "organization ID is required and cannot be empty".to_owned(),
            ));
        }
        if props.hosted_zone_id.trim().is_empty() {
            return Err(DxStackError::InvalidInput(
                "hosted zone ID is required and cannot be empty".to_owned(),
            ));
        }
        // The role is looked up by name from member accounts, so the name
        // must be derived the same way on both sides.
        let root = root_domain(&props.root_domain_name)?;
        let role_name = delegation_role_name(&root);

        let assume_role_policy = PolicyDocument::new(vec![
            PolicyStatement::allow()
                .action("sts:AssumeRole")
                .any_principal()
                .condition(
                    "StringEquals",
                    json!({ "aws:PrincipalOrgID": props.organization_id }),
                ),
        ]);
        let record_policy = PolicyDocument::new(vec![
            PolicyStatement::allow()
                .actions([
                    "route53:ChangeResourceRecordSets",
                    "route53:GetChange",
                    "route53:GetHostedZone",
                    "route53:ListResourceRecordSets",
                ])
                .resource(json!(format!(
                    "arn:aws:route53:::hostedzone/{}",
                    props.hosted_zone_id
                ))),
        ]);

        let role = Role::new(
            stack,
            id,
            RoleProps::assumed_by(assume_role_policy)
                .named(role_name.clone())
                .described(format!(
                    "Allows accounts in the organization to modify Route 53 records for {root}"
                ))
                .with_policy("root-zone-records", record_policy),
        )?;

        Ok(Self { role, role_name })
    }

    /// The provisioned role's conventional name.
    #[must_use]
    pub fn role_name(&self) -> &str {
        &self.role_name
    }

    /// Intrinsic resolving to the role ARN.
    #[must_use]
    pub fn arn(&self) -> serde_json::Value {
        self.role.arn()
    }
}
