//! Subdomain zone, delegation, and record synthesis tests.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use dxstack_core::AccountId;
    use dxstack_core::intrinsics::get_att;
    use dxstack_route53::{
        DelegationRole, DelegationRoleProps, DomainRecords, HostedZoneRef, SubdomainZone,
        SubdomainZoneProps, ZoneDelegation, ZoneDelegationProps,
    };

    use crate::{has_resource_properties, resources_of_type, synth, test_stack};

    #[test]
    fn test_should_create_zone_delegation_pair() {
        // Member-account side: the zone plus its delegation record.
        let mut stack = test_stack("DnsStack");
        let zone = SubdomainZone::new(
            &mut stack,
            "DevZone",
            SubdomainZoneProps::new("dev.example.com"),
        )
        .unwrap();
        zone.output_name_servers(&mut stack).unwrap();
        ZoneDelegation::new(
            &mut stack,
            "DevDelegation",
            &zone,
            ZoneDelegationProps::new(AccountId::new("210987654321").unwrap(), "Z0ROOT"),
        )
        .unwrap();

        let template = synth(&stack);
        assert!(has_resource_properties(
            &template,
            "AWS::Route53::HostedZone",
            &json!({ "Name": "dev.example.com" }),
        ));
        assert!(has_resource_properties(
            &template,
            "Custom::CrossAccountZoneDelegation",
            &json!({
                "AssumeRoleArn":
                    "arn:aws:iam::210987654321:role/DxRoute53DelegationRole-example-com",
                "ParentZoneId": "Z0ROOT",
                "DelegatedZoneName": "dev.example.com",
            }),
        ));
        // Record cleanup plus the delegation handler.
        assert_eq!(resources_of_type(&template, "AWS::Lambda::Function").len(), 2);
        assert!(template["Outputs"]["DevZoneNameServers"].is_object());
    }

    #[test]
    fn test_should_match_role_names_across_accounts() {
        // Root-account side: the role the delegation record assumes.
        let mut root_stack = test_stack("RootDnsStack");
        let role = DelegationRole::new(
            &mut root_stack,
            "Delegation",
            DelegationRoleProps {
                organization_id: "o-abcd12efg1".to_owned(),
                root_domain_name: "example.com".to_owned(),
                hosted_zone_id: "Z0ROOT".to_owned(),
            },
        )
        .unwrap();

        // Member-account side derives the same name from the subdomain.
        let mut member_stack = test_stack("DnsStack");
        let zone = SubdomainZone::new(
            &mut member_stack,
            "DevZone",
            SubdomainZoneProps::new("dev.example.com"),
        )
        .unwrap();
        let delegation = ZoneDelegation::new(
            &mut member_stack,
            "DevDelegation",
            &zone,
            ZoneDelegationProps::new(AccountId::new("210987654321").unwrap(), "Z0ROOT"),
        )
        .unwrap();

        assert!(delegation.delegation_role_arn().ends_with(role.role_name()));

        let template = synth(&root_stack);
        assert!(has_resource_properties(
            &template,
            "AWS::IAM::Role",
            &json!({
                "RoleName": "DxRoute53DelegationRole-example-com",
                "Policies": [{
                    "PolicyName": "root-zone-records",
                    "PolicyDocument": {
                        "Statement": [{
                            "Effect": "Allow",
                            "Action": [
                                "route53:ChangeResourceRecordSets",
                                "route53:GetChange",
                                "route53:GetHostedZone",
                                "route53:ListResourceRecordSets",
                            ],
                            "Resource": ["arn:aws:route53:::hostedzone/Z0ROOT"],
                        }],
                    },
                }],
            }),
        ));
    }

    #[test]
    fn test_should_add_alias_and_cname_records() {
        let mut stack = test_stack("RecordStack");
        let records =
            DomainRecords::new(HostedZoneRef::new("dev.example.com", "Z1234567890").unwrap());
        records
            .add_cloudfront_alias(&mut stack, get_att("Cdn", "DomainName"))
            .unwrap();
        let cname_ids = records
            .add_cnames(
                &mut stack,
                &[String::new(), "www".to_owned()],
                "d111abcdef8.cloudfront.net",
            )
            .unwrap();

        // The empty host stands for the apex, which the alias covers.
        assert_eq!(cname_ids.len(), 1);
        let template = synth(&stack);
        assert!(has_resource_properties(
            &template,
            "AWS::Route53::RecordSet",
            &json!({
                "Name": "dev.example.com",
                "Type": "A",
                "AliasTarget": { "HostedZoneId": "Z2FDTNDATAQYW2" },
            }),
        ));
        assert!(has_resource_properties(
            &template,
            "AWS::Route53::RecordSet",
            &json!({
                "Name": "www.dev.example.com",
                "Type": "CNAME",
                "ResourceRecords": ["d111abcdef8.cloudfront.net"],
            }),
        ));
    }
}
