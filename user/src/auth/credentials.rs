//! Credential verification against the single configured identity

use argon2::{
    password_hash::{PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use rand::RngCore;
use tracing::{debug, info, warn};

use crate::error::{Result, UserError};

/// Checks a plaintext password against a stored hash.
pub trait PasswordCheck: Send + Sync {
    fn check(&self, password: &str, password_hash: &str) -> bool;
}

/// Argon2 verification of PHC-formatted hashes
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Check;

impl PasswordCheck for Argon2Check {
    fn check(&self, password: &str, password_hash: &str) -> bool {
        match PasswordHash::new(password_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                warn!("Stored password hash could not be parsed: {}", e);
                false
            }
        }
    }
}

/// Hash a password into an argon2 PHC string suitable for `AUTH_PASSWORD`
pub fn hash_password(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt_bytes);

    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

/// Validates a username/password pair against the configured admin identity.
///
/// The username is compared first; the password check only runs when it
/// matches.
pub struct CredentialVerifier<C = Argon2Check> {
    username: String,
    password_hash: String,
    check: C,
}

impl CredentialVerifier<Argon2Check> {
    /// Create a verifier for the configured identity.
    ///
    /// Fails if the username is empty or the hash is not a PHC string.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let password_hash = password_hash.into();

        if username.is_empty() {
            return Err(UserError::Configuration(
                "admin username must not be empty".to_string(),
            ));
        }

        PasswordHash::new(&password_hash).map_err(|e| {
            UserError::Configuration(format!("admin password hash is invalid: {}", e))
        })?;

        Ok(Self::with_check(username, password_hash, Argon2Check))
    }
}

impl<C: PasswordCheck> CredentialVerifier<C> {
    /// Create a verifier with a custom password check.
    pub fn with_check(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        check: C,
    ) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            check,
        }
    }

    /// The configured identity
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns true only for the configured username with its correct password.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        if username.is_empty() || password.is_empty() {
            debug!("Credential check rejected: empty username or password");
            return false;
        }

        if username != self.username {
            info!("Credential check rejected: unknown username");
            return false;
        }

        let valid = self.check.check(password, &self.password_hash);
        if valid {
            info!("Credentials verified for {}", username);
        } else {
            warn!("Credential check failed for {}", username);
        }
        valid
    }
}
