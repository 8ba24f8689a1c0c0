//! Hosted zone constructs and references.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use dxstack_core::intrinsics::{get_att, get_ref, join};
use dxstack_core::{DxStackError, DxStackResult, Output, RemovalPolicy, Resource, Stack};
use dxstack_iam::{PolicyDocument, PolicyStatement, Role, RoleProps};
use dxstack_lambda::{Function, FunctionProfile, FunctionProps};

use crate::domain::root_domain;

/// Inline handler that deletes every record except NS and SOA when the
/// zone's stack is deleted, so the hosted zone itself can be removed.
const RECORD_CLEANUP_HANDLER: &str = r"
const { Route53Client, ListResourceRecordSetsCommand, ChangeResourceRecordSetsCommand } = require('@aws-sdk/client-route-53');
const response = require('cfn-response');
const client = new Route53Client({});

exports.handler = async (event, context) => {
    let status = response.SUCCESS;
    if (event.RequestType === 'Delete') {
        try {
            const zoneId = event.ResourceProperties.HostedZoneId;
            const records = await client.send(new ListResourceRecordSetsCommand({
                HostedZoneId: zoneId,
            }));
            for (const record of records.ResourceRecordSets) {
                if (record.Type !== 'NS' && record.Type !== 'SOA') {
                    await client.send(new ChangeResourceRecordSetsCommand({
                        HostedZoneId: zoneId,
                        ChangeBatch: {
                            Changes: [{ Action: 'DELETE', ResourceRecordSet: record }],
                        },
                    }));
                }
            }
        } catch (err) {
            console.error('record cleanup failed', err);
            status = response.FAILED;
        }
    }
    await response.send(event, context, status);
};
";

/// A reference to a hosted zone that already exists, identified by zone
/// name and zone ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedZoneRef {
    /// The zone's fully qualified name, e.g. `dev.example.com`.
    pub zone_name: String,
    /// The hosted zone ID.
    pub hosted_zone_id: String,
}

impl HostedZoneRef {
    /// Reference an existing zone.
    ///
    /// # Errors
    /// Fails when either field is empty.
    pub fn new(
        zone_name: impl Into<String>,
        hosted_zone_id: impl Into<String>,
    ) -> DxStackResult<Self> {
        let zone_name = zone_name.into();
        let hosted_zone_id = hosted_zone_id.into();
        if zone_name.trim().is_empty() {
            return Err(DxStackError::InvalidInput(
                "zone name is required and cannot be empty".to_owned(),
            ));
        }
        if hosted_zone_id.trim().is_empty() {
            return Err(DxStackError::InvalidInput(
                "hosted zone ID is required and cannot be empty".to_owned(),
            ));
        }
        Ok(Self {
            zone_name,
            hosted_zone_id,
        })
    }
}

/// Properties for a [`SubdomainZone`].
#[derive(Debug, Clone)]
pub struct SubdomainZoneProps {
    /// Fully qualified subdomain, e.g. `dev.example.com`.
    pub zone_name: String,
    /// Whether to emit the record-cleanup custom resource so the zone can
    /// be deleted even after records were written into it out of band.
    pub cleanup_records_on_delete: bool,
}

impl SubdomainZoneProps {
    /// Props with record cleanup enabled.
    #[must_use]
    pub fn new(zone_name: impl Into<String>) -> Self {
        Self {
            zone_name: zone_name.into(),
            cleanup_records_on_delete: true,
        }
    }
}

/// A public hosted zone for a delegated subdomain.
#[derive(Debug)]
pub struct SubdomainZone {
    logical_id: String,
    zone_name: String,
}

impl SubdomainZone {
    /// Add the hosted zone (and, by default, its record-cleanup custom
    /// resource) to the stack.
    ///
    /// # Errors
    /// Fails when the zone name cannot yield a two-label root domain, or
    /// on logical ID collisions.
    pub fn new(stack: &mut Stack, id: &str, props: SubdomainZoneProps) -> DxStackResult<Self> {
        // Validates the name shape before anything is emitted; the root
        // domain itself is only needed later, for delegation.
        root_domain(&props.zone_name)?;

        let resource = Resource::new(
            "AWS::Route53::HostedZone",
            json!({ "Name": props.zone_name }),
        )
        .with_removal_policy(RemovalPolicy::Destroy);
        let logical_id = stack.add_resource(id, resource)?;
        debug!(zone = %props.zone_name, logical_id = %logical_id, "added subdomain hosted zone");

        let zone = Self {
            logical_id,
            zone_name: props.zone_name,
        };
        if props.cleanup_records_on_delete {
            zone.add_cleanup_resources(stack, id)?;
        }
        Ok(zone)
    }

    /// The zone's fully qualified name.
    #[must_use]
    pub fn zone_name(&self) -> &str {
        &self.zone_name
    }

    /// The zone's logical ID within its stack.
    #[must_use]
    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    /// Intrinsic resolving to the hosted zone ID.
    #[must_use]
    pub fn zone_id(&self) -> Value {
        get_ref(&self.logical_id)
    }

    /// Intrinsic resolving to the zone's name server list.
    #[must_use]
    pub fn name_servers(&self) -> Value {
        get_att(&self.logical_id, "NameServers")
    }

    /// Output the zone's name servers as a comma-separated list, for
    /// operators wiring delegation by hand.
    ///
    /// # Errors
    /// Fails if the output name is already taken.
    pub fn output_name_servers(&self, stack: &mut Stack) -> DxStackResult<()> {
        stack.add_output(
            &format!("{}NameServers", self.logical_id),
            Output::new(
                join(", ", self.name_servers()),
                "Name servers of the subdomain hosted zone",
            ),
        )
    }

    fn add_cleanup_resources(&self, stack: &mut Stack, id: &str) -> DxStackResult<()> {
        let policy = PolicyDocument::new(vec![
            PolicyStatement::allow()
                .actions(["route53:ListResourceRecordSets", "route53:ChangeResourceRecordSets"])
                .resource(join(
                    "",
                    json!(["arn:aws:route53:::hostedzone/", self.zone_id()]),
                )),
        ]);
        let role = Role::new(
            stack,
            &format!("{id}CleanupRole"),
            RoleProps::assumed_by(PolicyDocument::lambda_assume_role())
                .described(format!("Removes leftover records from the {id} zone on deletion"))
                .with_policy("record-cleanup", policy)
                .with_managed_policy(
                    "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole",
                ),
        )?;

        let function = Function::new(
            stack,
            &format!("{id}CleanupFunction"),
            FunctionProps::inline(
                FunctionProfile::Small,
                "index.handler",
                role.arn(),
                RECORD_CLEANUP_HANDLER,
            ),
        )?;

        stack.add_resource(
            &format!("{id}RecordCleanup"),
            Resource::new(
                "Custom::HostedZoneRecordCleanup",
                json!({
                    "ServiceToken": function.arn(),
                    "HostedZoneId": self.zone_id(),
                }),
            ),
        )?;
        Ok(())
    }
}
