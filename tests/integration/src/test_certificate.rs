//! Certificate synthesis tests.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use dxstack_acm::{
        Certificate, CertificateProps, MultiDomainCertificate, MultiDomainCertificateProps,
    };
    use dxstack_core::DxStackError;
    use dxstack_route53::HostedZoneRef;

    use crate::{has_resource_properties, synth, test_stack};

    fn default_props() -> CertificateProps {
        CertificateProps::new("dev.example.com", "Z1234567890")
    }

    #[test]
    fn test_should_create_certificate_with_dns_validation() {
        let mut stack = test_stack("TestStack");
        Certificate::new(&mut stack, "TestCertificate", default_props()).unwrap();

        let template = synth(&stack);
        assert!(has_resource_properties(
            &template,
            "AWS::CertificateManager::Certificate",
            &json!({
                "DomainName": "dev.example.com",
                "ValidationMethod": "DNS",
            }),
        ));
    }

    #[test]
    fn test_should_add_subject_alternative_names() {
        let mut stack = test_stack("TestStack");
        let mut props = default_props();
        props.subject_alternative_names =
            vec!["api.example.com".to_owned(), "www.example.com".to_owned()];
        Certificate::new(&mut stack, "TestCertificateWithSans", props).unwrap();

        let template = synth(&stack);
        assert!(has_resource_properties(
            &template,
            "AWS::CertificateManager::Certificate",
            &json!({
                "DomainName": "dev.example.com",
                "SubjectAlternativeNames": ["api.example.com", "www.example.com"],
            }),
        ));
    }

    #[test]
    fn test_should_output_certificate_arn() {
        let mut stack = test_stack("TestStack");
        Certificate::new(&mut stack, "Test", default_props()).unwrap();

        let template = synth(&stack);
        let output = &template["Outputs"]["CertificateArn"];
        assert_eq!(output["Value"]["Ref"], "Test");
        assert_eq!(output["Description"], "The ARN of the certificate");
        assert_eq!(output["Export"]["Name"], "CertificateArn");
    }

    #[test]
    fn test_should_reject_empty_domain_or_zone() {
        let mut stack = test_stack("TestStack");
        let err = Certificate::new(
            &mut stack,
            "InvalidCertificate",
            CertificateProps::new("", ""),
        )
        .unwrap_err();
        assert!(matches!(err, DxStackError::InvalidInput(_)));

        let err = Certificate::new(
            &mut stack,
            "MissingHostedZoneId",
            CertificateProps::new("example.com", ""),
        )
        .unwrap_err();
        assert!(matches!(err, DxStackError::InvalidInput(_)));
    }

    #[test]
    fn test_should_validate_multi_zone_certificate() {
        let mut stack = test_stack("TestStack");
        MultiDomainCertificate::new(
            &mut stack,
            "MultiCert",
            MultiDomainCertificateProps {
                primary: HostedZoneRef::new("example.com", "Z1PRIMARY").unwrap(),
                alternatives: vec![HostedZoneRef::new("example.net", "Z2ALT").unwrap()],
                host_names: vec!["www".to_owned(), String::new()],
            },
        )
        .unwrap();

        let template = synth(&stack);
        assert!(has_resource_properties(
            &template,
            "AWS::CertificateManager::Certificate",
            &json!({
                "DomainName": "www.example.com",
                "DomainValidationOptions": [
                    { "DomainName": "www.example.com", "HostedZoneId": "Z1PRIMARY" },
                    { "DomainName": "example.com", "HostedZoneId": "Z1PRIMARY" },
                    { "DomainName": "www.example.net", "HostedZoneId": "Z2ALT" },
                    { "DomainName": "example.net", "HostedZoneId": "Z2ALT" },
                ],
            }),
        ));
    }
}
