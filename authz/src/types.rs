//! Core authorization types for the journal's access control list.
//!
//! The model is intentionally small: a caller is a [`Principal`], a route may
//! require a [`Capability`], and an [`Acl`] is an ordered list of
//! [`AclEntry`] rules. Entry order is load-bearing; the first rule whose
//! principal class and capability both match decides the outcome.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the caller of a request.
///
/// `Authenticated` is only ever produced by successful session resolution;
/// everything else is `Anonymous`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Principal {
    /// No valid session was presented.
    Anonymous,
    /// A caller holding a valid session for `identity`.
    Authenticated { identity: String },
}

impl Principal {
    /// Creates an authenticated principal for the given identity.
    pub fn authenticated(identity: impl Into<String>) -> Self {
        Self::Authenticated {
            identity: identity.into(),
        }
    }

    /// Creates the anonymous principal.
    pub fn anonymous() -> Self {
        Self::Anonymous
    }

    /// Check if the principal carries an identity
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Principal::Authenticated { .. })
    }

    /// Get the identity if authenticated
    pub fn identity(&self) -> Option<&str> {
        match self {
            Principal::Authenticated { identity } => Some(identity.as_str()),
            Principal::Anonymous => None,
        }
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Principal::Anonymous => write!(f, "anonymous"),
            Principal::Authenticated { identity } => write!(f, "{}", identity),
        }
    }
}

/// A named permission checked by the authorization gate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(String);

impl Capability {
    /// Name of the only capability the journal defines.
    pub const ADMIN: &'static str = "admin";

    /// Creates a capability with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The capability required to create and edit entries.
    pub fn admin() -> Self {
        Self::new(Self::ADMIN)
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of an authorization check, also used as the effect of an ACL rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        self == Decision::Allow
    }
}

/// Which callers an ACL rule applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalClass {
    /// Matches every caller, anonymous included.
    Everyone,
    /// Matches any caller with a valid session.
    Authenticated,
    /// Matches exactly one identity.
    Identity(String),
}

impl PrincipalClass {
    /// Whether this class covers the given principal.
    pub fn matches(&self, principal: &Principal) -> bool {
        match (self, principal) {
            (PrincipalClass::Everyone, _) => true,
            (PrincipalClass::Authenticated, Principal::Authenticated { .. }) => true,
            (PrincipalClass::Identity(expected), Principal::Authenticated { identity }) => {
                expected == identity
            }
            _ => false,
        }
    }
}

/// A single `(effect, principal class, capability)` rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AclEntry {
    pub effect: Decision,
    #[serde(rename = "principal")]
    pub principal_class: PrincipalClass,
    pub capability: Capability,
}

impl AclEntry {
    pub fn new(effect: Decision, principal_class: PrincipalClass, capability: Capability) -> Self {
        Self {
            effect,
            principal_class,
            capability,
        }
    }

    pub fn allow(principal_class: PrincipalClass, capability: Capability) -> Self {
        Self::new(Decision::Allow, principal_class, capability)
    }

    pub fn deny(principal_class: PrincipalClass, capability: Capability) -> Self {
        Self::new(Decision::Deny, principal_class, capability)
    }

    /// A rule applies when both its principal class and capability match.
    pub fn applies_to(&self, principal: &Principal, capability: &Capability) -> bool {
        self.capability == *capability && self.principal_class.matches(principal)
    }
}

/// An ordered access control list, evaluated top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Acl(Vec<AclEntry>);

impl Acl {
    pub fn new(entries: Vec<AclEntry>) -> Self {
        Self(entries)
    }

    /// The journal's stock policy: any authenticated caller holds `admin`.
    pub fn journal_default() -> Self {
        Self(vec![AclEntry::allow(
            PrincipalClass::Authenticated,
            Capability::admin(),
        )])
    }

    pub fn entries(&self) -> &[AclEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<AclEntry>> for Acl {
    fn from(entries: Vec<AclEntry>) -> Self {
        Self(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_helpers() {
        let anon = Principal::anonymous();
        assert!(!anon.is_authenticated());
        assert!(anon.identity().is_none());
        assert_eq!(anon.to_string(), "anonymous");

        let admin = Principal::authenticated("ffowler");
        assert!(admin.is_authenticated());
        assert_eq!(admin.identity(), Some("ffowler"));
        assert_eq!(admin.to_string(), "ffowler");
    }

    #[test]
    fn test_principal_class_matching() {
        let anon = Principal::anonymous();
        let alice = Principal::authenticated("alice");

        assert!(PrincipalClass::Everyone.matches(&anon));
        assert!(PrincipalClass::Everyone.matches(&alice));

        assert!(!PrincipalClass::Authenticated.matches(&anon));
        assert!(PrincipalClass::Authenticated.matches(&alice));

        let only_alice = PrincipalClass::Identity("alice".to_string());
        assert!(only_alice.matches(&alice));
        assert!(!only_alice.matches(&Principal::authenticated("bob")));
        assert!(!only_alice.matches(&anon));
    }

    #[test]
    fn test_acl_json_shape() {
        let json = r#"[
            {"effect": "deny", "principal": {"identity": "mallory"}, "capability": "admin"},
            {"effect": "allow", "principal": "authenticated", "capability": "admin"}
        ]"#;

        let acl: Acl = serde_json::from_str(json).unwrap();
        assert_eq!(acl.len(), 2);
        assert_eq!(acl.entries()[0].effect, Decision::Deny);
        assert_eq!(
            acl.entries()[0].principal_class,
            PrincipalClass::Identity("mallory".to_string())
        );
        assert_eq!(acl.entries()[1].principal_class, PrincipalClass::Authenticated);
        assert_eq!(acl.entries()[1].capability, Capability::admin());
    }

    #[test]
    fn test_default_acl() {
        let acl = Acl::journal_default();
        assert_eq!(
            acl.entries(),
            &[AclEntry::allow(PrincipalClass::Authenticated, Capability::admin())]
        );
    }
}
