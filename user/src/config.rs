//! Authentication configuration loaded from the environment
//!
//! Every value the authentication layer needs is read once at startup and
//! passed into constructors as an explicit struct. Missing or malformed values
//! are reported as [`UserError::Configuration`]; the caller is expected to
//! treat that as fatal.

use std::{env, fmt};

use argon2::password_hash::PasswordHash;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, UserError};

/// Minimum accepted length of the session signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 16;

/// Default validity window for a session token (24 hours).
pub const DEFAULT_TIMEOUT_SECONDS: i64 = 86400;

/// Default session cookie name.
pub const DEFAULT_COOKIE_NAME: &str = "journal_session";

/// Environment variable names
pub struct EnvKeys;

impl EnvKeys {
    pub const USERNAME: &'static str = "AUTH_USERNAME";
    pub const PASSWORD: &'static str = "AUTH_PASSWORD";
    pub const SECRET: &'static str = "AUTH_SECRET";
    pub const CSRF: &'static str = "CSRF_PROTECTION";
    pub const TIMEOUT: &'static str = "SESSION_TIMEOUT_SECONDS";
    pub const ENVIRONMENT: &'static str = "ENVIRONMENT";
}

/// Everything the authentication layer needs at startup
#[derive(Clone)]
pub struct AuthConfig {
    /// The single identity allowed to log in
    pub admin_username: String,
    /// Argon2 PHC string for the admin password
    pub admin_password_hash: String,
    /// Session cookie and signing settings
    pub session: SessionConfig,
    /// Whether state-changing requests must carry a CSRF token
    pub csrf_enabled: bool,
}

impl AuthConfig {
    /// Load configuration from process environment, reading `.env` first
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let admin_username = require(&lookup, EnvKeys::USERNAME)?;
        let admin_password_hash = require(&lookup, EnvKeys::PASSWORD)?;

        PasswordHash::new(&admin_password_hash).map_err(|e| {
            UserError::Configuration(format!(
                "{} is not a valid password hash: {}",
                EnvKeys::PASSWORD,
                e
            ))
        })?;

        let secret = require(&lookup, EnvKeys::SECRET)?;
        let mut session = SessionConfig::new(secret.into_bytes())?;

        if let Some(timeout) = lookup(EnvKeys::TIMEOUT) {
            session.timeout_seconds = timeout
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|t| *t > 0)
                .ok_or_else(|| {
                    UserError::Configuration(format!(
                        "{} must be a positive number of seconds",
                        EnvKeys::TIMEOUT
                    ))
                })?;
        }

        let environment = lookup(EnvKeys::ENVIRONMENT).unwrap_or_else(|| "dev".to_string());
        session.secure = environment == "prd";

        let csrf_enabled = match lookup(EnvKeys::CSRF) {
            None => true,
            Some(value) => parse_toggle(&value).ok_or_else(|| {
                UserError::Configuration(format!(
                    "{} must be on or off, got {:?}",
                    EnvKeys::CSRF,
                    value
                ))
            })?,
        };

        info!(
            "Authentication configured for admin identity {} (environment: {}, csrf: {})",
            admin_username,
            environment,
            if csrf_enabled { "on" } else { "off" }
        );

        Ok(Self {
            admin_username,
            admin_password_hash,
            session,
            csrf_enabled,
        })
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("admin_username", &self.admin_username)
            .field("admin_password_hash", &"<redacted>")
            .field("session", &self.session)
            .field("csrf_enabled", &self.csrf_enabled)
            .finish()
    }
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => {
            debug!("Found configuration value {}", key);
            Ok(value.trim().to_string())
        }
        _ => Err(UserError::Configuration(format!("{} not set", key))),
    }
}

fn parse_toggle(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Session configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session cookie name
    pub cookie_name: String,
    /// Session timeout in seconds
    pub timeout_seconds: i64,
    /// Whether to use secure cookies (HTTPS only)
    pub secure: bool,
    /// SameSite cookie attribute
    pub same_site: SameSiteConfig,
    /// Session signing key
    #[serde(skip_serializing)]
    pub secret_key: Vec<u8>,
}

impl SessionConfig {
    /// Create a session configuration around a signing secret
    pub fn new(secret_key: Vec<u8>) -> Result<Self> {
        if secret_key.len() < MIN_SECRET_LEN {
            return Err(UserError::Configuration(format!(
                "session secret must be at least {} bytes",
                MIN_SECRET_LEN
            )));
        }

        Ok(Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            secure: false, // Set to true in production with HTTPS
            same_site: SameSiteConfig::Lax,
            secret_key,
        })
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("cookie_name", &self.cookie_name)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("secure", &self.secure)
            .field("same_site", &self.same_site)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// SameSite cookie configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSiteConfig {
    Strict,
    Lax,
    None,
}

impl fmt::Display for SameSiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SameSiteConfig::Strict => write!(f, "Strict"),
            SameSiteConfig::Lax => write!(f, "Lax"),
            SameSiteConfig::None => write!(f, "None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    // A syntactically valid argon2 PHC string; config loading only parses it.
    const HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHRzYWx0$8Zb6tQvK0Hq7yyb8k0bqv8xWmQk0cE3TqS0Ck0sFv2M";

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn base() -> Vec<(&'static str, &'static str)> {
        vec![
            (EnvKeys::USERNAME, "ffowler"),
            (EnvKeys::PASSWORD, HASH),
            (EnvKeys::SECRET, "donttellanyone-ever"),
        ]
    }

    #[test]
    fn test_defaults() {
        let config = AuthConfig::from_lookup(lookup(&base())).unwrap();

        assert_eq!(config.admin_username, "ffowler");
        assert_eq!(config.admin_password_hash, HASH);
        assert!(config.csrf_enabled);
        assert_eq!(config.session.cookie_name, "journal_session");
        assert_eq!(config.session.timeout_seconds, 86400);
        assert_eq!(config.session.same_site, SameSiteConfig::Lax);
        assert!(!config.session.secure);
        assert_eq!(config.session.secret_key, b"donttellanyone-ever");
    }

    #[test]
    fn test_missing_values_are_fatal() {
        for missing in [EnvKeys::USERNAME, EnvKeys::PASSWORD, EnvKeys::SECRET] {
            let pairs: Vec<_> = base().into_iter().filter(|(k, _)| *k != missing).collect();
            let err = AuthConfig::from_lookup(lookup(&pairs)).unwrap_err();
            assert!(
                err.to_string().contains(missing),
                "error for {} should name it: {}",
                missing,
                err
            );
        }
    }

    #[test]
    fn test_blank_username_is_fatal() {
        let mut pairs = base();
        pairs[0] = (EnvKeys::USERNAME, "   ");
        assert!(AuthConfig::from_lookup(lookup(&pairs)).is_err());
    }

    #[test]
    fn test_password_must_be_a_hash() {
        let mut pairs = base();
        pairs[1] = (EnvKeys::PASSWORD, "plaintext-password");
        let err = AuthConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, UserError::Configuration(_)));
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut pairs = base();
        pairs[2] = (EnvKeys::SECRET, "short");
        assert!(AuthConfig::from_lookup(lookup(&pairs)).is_err());
    }

    #[test]
    fn test_optional_values() {
        let mut pairs = base();
        pairs.push((EnvKeys::CSRF, "off"));
        pairs.push((EnvKeys::TIMEOUT, "3600"));
        pairs.push((EnvKeys::ENVIRONMENT, "prd"));

        let config = AuthConfig::from_lookup(lookup(&pairs)).unwrap();
        assert!(!config.csrf_enabled);
        assert_eq!(config.session.timeout_seconds, 3600);
        assert!(config.session.secure);
    }

    #[test]
    fn test_invalid_optional_values() {
        let mut pairs = base();
        pairs.push((EnvKeys::CSRF, "sometimes"));
        assert!(AuthConfig::from_lookup(lookup(&pairs)).is_err());

        let mut pairs = base();
        pairs.push((EnvKeys::TIMEOUT, "-5"));
        assert!(AuthConfig::from_lookup(lookup(&pairs)).is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig::from_lookup(lookup(&base())).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("donttellanyone"));
        assert!(!printed.contains("argon2id"));
        assert!(printed.contains("ffowler"));
    }
}
