//! Authentication module for the learning journal
//!
//! This module provides:
//! - Credential verification for the single admin identity
//! - Stateless signed session tokens carried in a cookie
//! - Session-bound CSRF tokens for state-changing requests

pub mod credentials;
pub mod csrf;
pub mod session;
pub mod types;

use authz::types::Principal;

pub use credentials::{hash_password, Argon2Check, CredentialVerifier, PasswordCheck};
pub use csrf::{CsrfGuard, CSRF_FIELD, CSRF_HEADER};
pub use session::{SessionClaims, SessionStore};
pub use types::Credentials;

/// Authentication state resolved for a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub principal: Principal,
    /// Verified claims when the request carried a valid session token
    pub session: Option<SessionClaims>,
}

impl AuthState {
    pub fn anonymous() -> Self {
        Self {
            principal: Principal::anonymous(),
            session: None,
        }
    }

    /// Build the state from resolved claims; `None` degrades to anonymous
    pub fn from_claims(claims: Option<SessionClaims>) -> Self {
        match claims {
            Some(claims) => Self {
                principal: Principal::authenticated(claims.sub.clone()),
                session: Some(claims),
            },
            None => Self::anonymous(),
        }
    }

    /// Check if the request is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.principal.is_authenticated()
    }
}
