//! Profile resolution contract tests.
//!
//! These pin the resolver semantics every construct relies on: defaults
//! pass through untouched, overrides win key by key, structured fields
//! replace wholesale, unknown names fail closed, and resolution is a pure
//! function of its inputs.

#[cfg(test)]
mod tests {
    use dxstack_core::{Duration, DxStackError, RemovalPolicy};
    use dxstack_lambda::{FunctionOverrides, FunctionProfile};
    use dxstack_s3::{BucketOverrides, BucketProfile, LifecycleRule};

    #[test]
    fn test_should_resolve_empty_overrides_to_registry_defaults() {
        for profile in BucketProfile::ALL {
            assert_eq!(
                dxstack_s3::resolve(profile, &BucketOverrides::default()),
                profile.defaults()
            );
        }
        for profile in FunctionProfile::ALL {
            assert_eq!(
                dxstack_lambda::resolve(profile, &FunctionOverrides::default()),
                profile.defaults()
            );
        }
    }

    #[test]
    fn test_should_let_overrides_win_and_defaults_fill() {
        let overrides = BucketOverrides {
            removal_policy: Some(RemovalPolicy::Destroy),
            versioned: Some(false),
            ..BucketOverrides::default()
        };
        let config = dxstack_s3::resolve(BucketProfile::Prod, &overrides);

        // Present keys win.
        assert_eq!(config.removal_policy, RemovalPolicy::Destroy);
        assert!(!config.versioned);
        // Absent keys keep the profile default.
        assert_eq!(config.encryption, BucketProfile::Prod.defaults().encryption);
        assert_eq!(
            config.auto_delete_objects,
            BucketProfile::Prod.defaults().auto_delete_objects
        );
    }

    #[test]
    fn test_should_replace_structured_fields_wholesale() {
        let replacement = vec![LifecycleRule::expire_after(Duration::days(30))];
        let overrides = BucketOverrides {
            lifecycle_rules: Some(replacement.clone()),
            ..BucketOverrides::default()
        };
        let config = dxstack_s3::resolve(BucketProfile::Archive, &overrides);
        assert_eq!(config.lifecycle_rules, replacement);
    }

    #[test]
    fn test_should_fail_closed_on_unknown_profile_names() {
        for bad in ["production", "Dev", "tiny "] {
            assert!(matches!(
                bad.parse::<BucketProfile>(),
                Err(DxStackError::InvalidProfile { .. })
            ));
        }
        assert!(matches!(
            "large".parse::<FunctionProfile>(),
            Err(DxStackError::InvalidProfile { .. })
        ));
    }

    #[test]
    fn test_should_resolve_idempotently() {
        let overrides = BucketOverrides {
            bucket_name: Some("stable".to_owned()),
            ..BucketOverrides::default()
        };
        let first = dxstack_s3::resolve(BucketProfile::Dev, &overrides);
        let second = dxstack_s3::resolve(BucketProfile::Dev, &overrides);
        assert_eq!(first, second);
    }

    #[test]
    fn test_should_round_trip_profile_names() {
        for profile in BucketProfile::ALL {
            assert_eq!(profile.as_str().parse::<BucketProfile>().unwrap(), profile);
        }
        for profile in FunctionProfile::ALL {
            assert_eq!(profile.as_str().parse::<FunctionProfile>().unwrap(), profile);
        }
    }
}
