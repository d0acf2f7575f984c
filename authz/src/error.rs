//! Error types for the authorization system.
//!
//! Authorization decisions themselves never fail: an unmatched request is a
//! `Deny`, not an error. Errors only arise while loading a policy.

use thiserror::Error;

/// Errors that can occur while building an [`AuthzEngine`](crate::AuthzEngine).
#[derive(Debug, Error)]
pub enum AuthzError {
    /// The ACL document could not be parsed.
    #[error("Policy parsing failed: {0}")]
    PolicyParse(String),

    /// The ACL file could not be read.
    #[error("Policy file could not be read: {0}")]
    PolicyLoad(#[from] std::io::Error),

    /// The ACL parsed but contains no rules, which would deny everything.
    #[error("Policy contains no rules")]
    EmptyPolicy,
}

/// A specialized Result type for authorization operations.
pub type Result<T> = std::result::Result<T, AuthzError>;
