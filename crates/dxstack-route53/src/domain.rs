//! Root-domain and delegation-role derivation.
//!
//! A subdomain's parent zone lives in a separate, externally managed
//! account. By convention that account exposes a delegation role named
//! after the root domain; [`delegation_role_arn`] reconstructs the ARN from
//! nothing but the account ID and the domain. The role is referenced, never
//! created, here. [`crate::DelegationRole`] is the root-account side that
//! actually provisions it under the same name.

use dxstack_core::{AccountId, DxStackError, DxStackResult};

/// Name prefix shared by every cross-account DNS delegation role.
pub const DELEGATION_ROLE_PREFIX: &str = "DxRoute53DelegationRole";

/// Derive the parent (root) domain of a subdomain: the last two
/// dot-separated labels.
///
/// A two-label input is returned unchanged.
///
/// # Errors
/// Returns [`DxStackError::InvalidDomain`] when the input yields fewer
/// than two labels.
///
/// # Examples
///
/// ```
/// use dxstack_route53::root_domain;
///
/// assert_eq!(root_domain("dev.example.com").unwrap(), "example.com");
/// assert_eq!(root_domain("example.com").unwrap(), "example.com");
/// assert!(root_domain("example").is_err());
/// ```
pub fn root_domain(sub_domain_name: &str) -> DxStackResult<String> {
    let labels: Vec<&str> = sub_domain_name.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(DxStackError::InvalidDomain {
            name: sub_domain_name.to_owned(),
            reason: "expected a fully qualified name with at least two labels, like \"dev.example.com\""
                .to_owned(),
        });
    }
    Ok(format!(
        "{}.{}",
        labels[labels.len() - 2],
        labels[labels.len() - 1]
    ))
}

/// The conventional name of the delegation role for a root domain:
/// the shared prefix plus the domain with dots rewritten to hyphens.
#[must_use]
pub fn delegation_role_name(root_domain: &str) -> String {
    format!("{DELEGATION_ROLE_PREFIX}-{}", root_domain.replace('.', "-"))
}

/// The ARN of the delegation role in the root domain's owning account.
///
/// Pure string templating; the caller is expected to have validated the
/// domain through [`root_domain`] upstream.
#[must_use]
pub fn delegation_role_arn(root_account_id: &AccountId, root_domain: &str) -> String {
    format!(
        "arn:aws:iam::{root_account_id}:role/{}",
        delegation_role_name(root_domain)
    )
}
