//! ACL-based authorization for the learning journal.
//!
//! This crate defines the authorization types (Principal, Capability, ACL
//! entries) and an [`AuthzEngine`] that evaluates a request against an
//! ordered access control list.
//!
//! # Evaluation
//!
//! 1. Walk the ACL from the first rule to the last
//! 2. A rule matches when its principal class covers the caller **and** its
//!    capability equals the required one
//! 3. The first matching rule's effect is the decision
//! 4. If no rule matches, the decision is `Deny`
//!
//! Evaluation is a pure function of `(principal, capability, acl)`; the engine
//! holds no mutable state and can be shared freely between requests.

pub mod error;
pub mod types;

use error::{AuthzError, Result};
use std::path::Path;
use tracing::{debug, info};
use types::{Acl, AclEntry, Capability, Decision, Principal};

/// Decide whether `principal` holds `required` under `acl`.
///
/// Strict first-match with implicit deny: rule order is significant and an
/// exhausted list denies.
pub fn authorize(principal: &Principal, required: &Capability, acl: &[AclEntry]) -> Decision {
    acl.iter()
        .find(|entry| entry.applies_to(principal, required))
        .map(|entry| entry.effect)
        .unwrap_or(Decision::Deny)
}

/// The authorization gate consulted by the request pipeline.
///
/// # Example
///
/// ```rust
/// use authz::{AuthzEngine, types::{Capability, Decision, Principal}};
///
/// let engine = AuthzEngine::default();
///
/// assert_eq!(
///     engine.authorize(&Principal::anonymous(), &Capability::admin()),
///     Decision::Deny
/// );
/// assert_eq!(
///     engine.authorize(&Principal::authenticated("ffowler"), &Capability::admin()),
///     Decision::Allow
/// );
/// ```
#[derive(Debug, Clone)]
pub struct AuthzEngine {
    acl: Acl,
}

impl AuthzEngine {
    /// Creates an engine over the given ACL, preserving its order.
    pub fn new(acl: Acl) -> Self {
        Self { acl }
    }

    /// Parses an ACL from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let acl: Acl =
            serde_json::from_str(json).map_err(|e| AuthzError::PolicyParse(e.to_string()))?;

        if acl.is_empty() {
            return Err(AuthzError::EmptyPolicy);
        }

        Ok(Self::new(acl))
    }

    /// Loads an ACL from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let engine = Self::from_json_str(&json)?;

        info!(
            "Loaded ACL with {} rule(s) from {}",
            engine.acl.len(),
            path.display()
        );
        Ok(engine)
    }

    pub fn acl(&self) -> &Acl {
        &self.acl
    }

    /// Evaluates the engine's ACL for `principal` and `required`.
    pub fn authorize(&self, principal: &Principal, required: &Capability) -> Decision {
        let decision = authorize(principal, required, self.acl.entries());
        debug!(
            "ACL decision for principal={} capability={}: {:?}",
            principal, required, decision
        );
        decision
    }
}

impl Default for AuthzEngine {
    fn default() -> Self {
        Self::new(Acl::journal_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use types::PrincipalClass;

    fn admin() -> Capability {
        Capability::admin()
    }

    #[rstest]
    #[case::anonymous(Principal::anonymous(), Decision::Deny)]
    #[case::authenticated(Principal::authenticated("ffowler"), Decision::Allow)]
    #[case::other_identity(Principal::authenticated("someone_else"), Decision::Allow)]
    fn test_default_acl(#[case] principal: Principal, #[case] expected: Decision) {
        let engine = AuthzEngine::default();
        assert_eq!(engine.authorize(&principal, &admin()), expected);
    }

    #[test]
    fn test_empty_acl_denies() {
        let decision = authorize(&Principal::authenticated("ffowler"), &admin(), &[]);
        assert_eq!(decision, Decision::Deny);
    }

    #[test]
    fn test_unknown_capability_denied() {
        let engine = AuthzEngine::default();
        let decision = engine.authorize(
            &Principal::authenticated("ffowler"),
            &Capability::new("publish"),
        );
        assert_eq!(decision, Decision::Deny, "no rule names publish");
    }

    #[test]
    fn test_first_match_wins() {
        let deny_first = vec![
            AclEntry::deny(PrincipalClass::Identity("mallory".into()), admin()),
            AclEntry::allow(PrincipalClass::Authenticated, admin()),
        ];
        assert_eq!(
            authorize(&Principal::authenticated("mallory"), &admin(), &deny_first),
            Decision::Deny
        );
        assert_eq!(
            authorize(&Principal::authenticated("alice"), &admin(), &deny_first),
            Decision::Allow
        );

        // Same rules, reversed: the broad allow now shadows the deny.
        let allow_first: Vec<_> = deny_first.into_iter().rev().collect();
        assert_eq!(
            authorize(&Principal::authenticated("mallory"), &admin(), &allow_first),
            Decision::Allow
        );
    }

    #[test]
    fn test_rules_for_other_capabilities_are_skipped() {
        let acl = vec![
            AclEntry::deny(PrincipalClass::Everyone, Capability::new("publish")),
            AclEntry::allow(PrincipalClass::Everyone, admin()),
        ];
        assert_eq!(
            authorize(&Principal::anonymous(), &admin(), &acl),
            Decision::Allow
        );
    }

    #[test]
    fn test_everyone_matches_anonymous() {
        let acl = vec![AclEntry::allow(PrincipalClass::Everyone, admin())];
        assert_eq!(
            authorize(&Principal::anonymous(), &admin(), &acl),
            Decision::Allow
        );
    }

    #[test]
    fn test_identity_rule_ignores_anonymous() {
        let acl = vec![AclEntry::allow(
            PrincipalClass::Identity("ffowler".into()),
            admin(),
        )];
        assert_eq!(
            authorize(&Principal::anonymous(), &admin(), &acl),
            Decision::Deny
        );
    }

    #[test]
    fn test_repeated_checks_are_stable() {
        let engine = AuthzEngine::new(Acl::new(vec![
            AclEntry::deny(PrincipalClass::Identity("mallory".into()), admin()),
            AclEntry::allow(PrincipalClass::Authenticated, admin()),
        ]));

        for principal in [
            Principal::anonymous(),
            Principal::authenticated("mallory"),
            Principal::authenticated("alice"),
        ] {
            let first = engine.authorize(&principal, &admin());
            for _ in 0..10 {
                assert_eq!(engine.authorize(&principal, &admin()), first);
            }
        }
    }

    #[test]
    fn test_from_json_str() {
        let engine = AuthzEngine::from_json_str(
            r#"[{"effect": "allow", "principal": {"identity": "ffowler"}, "capability": "admin"}]"#,
        )
        .unwrap();

        assert_eq!(
            engine.authorize(&Principal::authenticated("ffowler"), &admin()),
            Decision::Allow
        );
        assert_eq!(
            engine.authorize(&Principal::authenticated("guest"), &admin()),
            Decision::Deny
        );
    }

    #[test]
    fn test_from_json_str_rejects_bad_policies() {
        assert!(matches!(
            AuthzEngine::from_json_str("not json"),
            Err(AuthzError::PolicyParse(_))
        ));
        assert!(matches!(
            AuthzEngine::from_json_str("[]"),
            Err(AuthzError::EmptyPolicy)
        ));
        assert!(matches!(
            AuthzEngine::from_json_str(
                r#"[{"effect": "maybe", "principal": "everyone", "capability": "admin"}]"#
            ),
            Err(AuthzError::PolicyParse(_))
        ));
    }
}
