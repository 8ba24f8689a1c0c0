//! Bucket synthesis tests.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use dxstack_s3::{Bucket, BucketOverrides, BucketProfile, BucketProps};

    use crate::{has_resource_properties, resources_of_type, synth, test_stack};

    #[test]
    fn test_should_create_versioned_auto_deleted_dev_bucket() {
        let mut stack = test_stack("TestStack");
        Bucket::new(
            &mut stack,
            "DevBucket",
            BucketProps {
                profile: BucketProfile::Dev,
                overrides: BucketOverrides::default(),
            },
        )
        .unwrap();

        let template = synth(&stack);
        assert!(has_resource_properties(
            &template,
            "AWS::S3::Bucket",
            &json!({ "VersioningConfiguration": { "Status": "Enabled" } }),
        ));
        assert_eq!(template["Resources"]["DevBucket"]["DeletionPolicy"], "Delete");
        // Auto-delete wires a cleanup function, role, and custom resource.
        assert_eq!(resources_of_type(&template, "AWS::Lambda::Function").len(), 1);
        assert_eq!(resources_of_type(&template, "Custom::S3BucketCleanup").len(), 1);
    }

    #[test]
    fn test_should_create_encrypted_retained_prod_bucket() {
        let mut stack = test_stack("TestStack");
        Bucket::new(
            &mut stack,
            "ProdBucket",
            BucketProps {
                profile: BucketProfile::Prod,
                overrides: BucketOverrides::default(),
            },
        )
        .unwrap();

        let template = synth(&stack);
        assert!(has_resource_properties(
            &template,
            "AWS::S3::Bucket",
            &json!({
                "BucketEncryption": {
                    "ServerSideEncryptionConfiguration": [
                        { "ServerSideEncryptionByDefault": { "SSEAlgorithm": "AES256" } },
                    ],
                },
            }),
        ));
        assert_eq!(template["Resources"]["ProdBucket"]["DeletionPolicy"], "Retain");
        assert!(resources_of_type(&template, "Custom::S3BucketCleanup").is_empty());
    }

    #[test]
    fn test_should_apply_overrides() {
        let mut stack = test_stack("TestStack");
        Bucket::new(
            &mut stack,
            "CustomBucket",
            BucketProps {
                profile: BucketProfile::Prod,
                overrides: BucketOverrides {
                    bucket_name: Some("custom-bucket-name".to_owned()),
                    ..BucketOverrides::default()
                },
            },
        )
        .unwrap();

        let template = synth(&stack);
        assert!(has_resource_properties(
            &template,
            "AWS::S3::Bucket",
            &json!({ "BucketName": "custom-bucket-name" }),
        ));
    }

    #[test]
    fn test_should_export_bucket_outputs() {
        let mut stack = test_stack("TestStack");
        Bucket::new(
            &mut stack,
            "DevBucket",
            BucketProps {
                profile: BucketProfile::Dev,
                overrides: BucketOverrides::default(),
            },
        )
        .unwrap();

        let template = synth(&stack);
        assert_eq!(
            template["Outputs"]["DevBucketBucketName"]["Export"]["Name"],
            "DevBucket-BucketName"
        );
        assert_eq!(
            template["Outputs"]["DevBucketBucketArn"]["Value"]["Fn::GetAtt"],
            json!(["DevBucket", "Arn"])
        );
    }
}
