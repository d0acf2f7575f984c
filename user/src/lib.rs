pub mod auth;
pub mod config;
pub mod error;

use std::sync::Arc;
use tracing::info;

use auth::{CredentialVerifier, CsrfGuard, SessionStore};
pub use config::{AuthConfig, SameSiteConfig, SessionConfig};

/// Authentication services for the single admin identity
#[derive(Clone)]
pub struct UserManager {
    verifier: Arc<CredentialVerifier>,
    session_store: SessionStore,
    csrf_guard: CsrfGuard,
}

impl UserManager {
    /// Create the authentication services from startup configuration
    pub fn new(config: AuthConfig) -> error::Result<Self> {
        info!("Initializing authentication services");

        let verifier = CredentialVerifier::new(
            config.admin_username.clone(),
            config.admin_password_hash.clone(),
        )?;
        let csrf_guard = CsrfGuard::new(&config.session.secret_key, config.csrf_enabled)?;
        let session_store = SessionStore::new(config.session)?;

        Ok(Self {
            verifier: Arc::new(verifier),
            session_store,
            csrf_guard,
        })
    }

    /// Get a reference to the credential verifier
    pub fn verifier(&self) -> &CredentialVerifier {
        &self.verifier
    }

    /// Get a reference to the session store
    pub fn session_store(&self) -> &SessionStore {
        &self.session_store
    }

    /// Get a reference to the CSRF guard
    pub fn csrf_guard(&self) -> &CsrfGuard {
        &self.csrf_guard
    }
}

// Re-export commonly used types
pub use auth::{hash_password, AuthState, Credentials, SessionClaims};
pub use error::{Result as UserResult, UserError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_manager_creation() {
        let hash = hash_password("pass").unwrap();
        let config = AuthConfig {
            admin_username: "ffowler".to_string(),
            admin_password_hash: hash,
            session: SessionConfig::new(b"donttellanyone-ever".to_vec()).unwrap(),
            csrf_enabled: true,
        };

        let manager = UserManager::new(config).unwrap();
        assert_eq!(manager.verifier().username(), "ffowler");
        assert!(manager.csrf_guard().is_enabled());

        let token = manager.session_store().issue("ffowler").unwrap();
        let claims = manager.session_store().resolve_claims(Some(&token)).unwrap();
        let csrf = manager.csrf_guard().issue(&claims);
        assert!(manager.csrf_guard().validate(Some(&claims), Some(&csrf)));
    }

    #[test]
    fn test_user_manager_rejects_bad_hash() {
        let config = AuthConfig {
            admin_username: "ffowler".to_string(),
            admin_password_hash: "pass".to_string(),
            session: SessionConfig::new(b"donttellanyone-ever".to_vec()).unwrap(),
            csrf_enabled: true,
        };

        assert!(matches!(
            UserManager::new(config),
            Err(UserError::Configuration(_))
        ));
    }
}
