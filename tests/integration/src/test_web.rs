//! End-to-end synthesis of a complete static-site stack: bucket, CDN,
//! edge functions, certificate, DNS records, and parameters together.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use dxstack_acm::{Certificate, CertificateProps};
    use dxstack_cloudfront::{
        BasicAuthEdge, BasicAuthEdgeProps, Distribution, DistributionProps, DomainAliases,
        UrlRewriteEdge,
    };
    use dxstack_route53::{DomainRecords, HostedZoneRef};
    use dxstack_s3::{Bucket, BucketOverrides, BucketProfile, BucketProps};
    use dxstack_ssm::{ParameterSet, ParameterSetProps, ParameterValue};

    use crate::{has_resource_properties, resources_of_type, synth, test_stack};

    #[test]
    fn test_should_synthesize_full_website_stack() {
        let mut stack = test_stack("WebsiteStack");

        let mut bucket = Bucket::new(
            &mut stack,
            "Site",
            BucketProps {
                profile: BucketProfile::Prod,
                overrides: BucketOverrides::default(),
            },
        )
        .unwrap();

        let certificate = Certificate::new(
            &mut stack,
            "SiteCert",
            CertificateProps::new("dev.example.com", "Z1234567890"),
        )
        .unwrap();

        let rewrite = UrlRewriteEdge::new(&mut stack, "Rewrite").unwrap();
        let auth = BasicAuthEdge::new(
            &mut stack,
            "Auth",
            BasicAuthEdgeProps {
                username: "preview".to_owned(),
                password: "letmein".to_owned(),
            },
        )
        .unwrap();

        let distribution = Distribution::new(
            &mut stack,
            "Cdn",
            &mut bucket,
            DistributionProps::builder()
                .domain(Some(DomainAliases::new(
                    vec!["dev.example.com".to_owned()],
                    certificate.arn(),
                )))
                .edge_associations(vec![rewrite.association(), auth.association()])
                .build(),
        )
        .unwrap();

        let records =
            DomainRecords::new(HostedZoneRef::new("dev.example.com", "Z1234567890").unwrap());
        records
            .add_cloudfront_alias(&mut stack, distribution.domain_name())
            .unwrap();

        ParameterSet::new(
            &mut stack,
            "SiteConfig",
            ParameterSetProps {
                system: "website".to_owned(),
                parameters: [(
                    "distribution-domain".to_owned(),
                    ParameterValue::new("resolved-at-deploy"),
                )]
                .into(),
            },
        )
        .unwrap();

        let template = synth(&stack);

        // Origin access: the distribution reads the bucket through OAC and
        // the bucket policy is scoped to this distribution's ARN.
        assert_eq!(
            resources_of_type(&template, "AWS::CloudFront::OriginAccessControl").len(),
            1
        );
        let policy_statement =
            &template["Resources"]["SitePolicy"]["Properties"]["PolicyDocument"]["Statement"][0];
        assert_eq!(
            policy_statement["Principal"]["Service"],
            "cloudfront.amazonaws.com"
        );

        // Both edge functions ride the default behavior as published versions.
        let associations = &template["Resources"]["Cdn"]["Properties"]["DistributionConfig"]
            ["DefaultCacheBehavior"]["LambdaFunctionAssociations"];
        assert_eq!(associations.as_array().unwrap().len(), 2);
        assert_eq!(associations[0]["LambdaFunctionARN"]["Ref"], "RewriteVersion");
        assert_eq!(associations[1]["LambdaFunctionARN"]["Ref"], "AuthVersion");

        // The alias record points at the distribution's generated domain.
        assert!(has_resource_properties(
            &template,
            "AWS::Route53::RecordSet",
            &json!({
                "Type": "A",
                "AliasTarget": {
                    "DNSName": { "Fn::GetAtt": ["Cdn", "DomainName"] },
                    "HostedZoneId": "Z2FDTNDATAQYW2",
                },
            }),
        ));

        // The certificate rides the viewer-facing TLS config.
        assert_eq!(
            template["Resources"]["Cdn"]["Properties"]["DistributionConfig"]
                ["ViewerCertificate"]["AcmCertificateArn"]["Ref"],
            "SiteCert"
        );

        // Parameters land under the system namespace.
        assert!(has_resource_properties(
            &template,
            "AWS::SSM::Parameter",
            &json!({ "Name": "/website/distribution-domain" }),
        ));
    }

    #[test]
    fn test_should_keep_stacks_independent() {
        // Same constructs in two stacks never cross-contaminate: each
        // resolution is computed fresh per instantiation.
        let mut first = test_stack("FirstStack");
        let mut second = test_stack("SecondStack");

        Bucket::new(
            &mut first,
            "Data",
            BucketProps {
                profile: BucketProfile::Archive,
                overrides: BucketOverrides::default(),
            },
        )
        .unwrap();
        Bucket::new(
            &mut second,
            "Data",
            BucketProps {
                profile: BucketProfile::Archive,
                overrides: BucketOverrides {
                    bucket_name: Some("named-archive".to_owned()),
                    ..BucketOverrides::default()
                },
            },
        )
        .unwrap();

        let first_template = synth(&first);
        let second_template = synth(&second);
        assert!(first_template["Resources"]["Data"]["Properties"]
            .get("BucketName")
            .is_none());
        assert_eq!(
            second_template["Resources"]["Data"]["Properties"]["BucketName"],
            "named-archive"
        );
        // The override in the second stack never leaked into the registry.
        assert!(dxstack_s3::BucketProfile::Archive.defaults().bucket_name.is_none());
    }
}
