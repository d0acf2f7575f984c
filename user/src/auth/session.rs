//! Stateless signed session tokens
//!
//! A session token is `payload "." signature` where `payload` is the
//! base64url-encoded JSON [`SessionClaims`] and `signature` is the
//! base64url-encoded HMAC-SHA512 of the payload under the server secret.
//! Nothing is stored server-side; logging out only tells the browser to drop
//! the cookie.

use authz::types::Principal;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD as B64, Engine};
use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha512;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::error::{Result, UserError};

type HmacSha512 = Hmac<Sha512>;

/// Tokens issued further than this in the future are treated as forged.
const CLOCK_SKEW_SECONDS: i64 = 60;

/// Claims carried inside a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// The authenticated identity
    pub sub: String,
    /// Issue time, seconds since the Unix epoch
    pub iat: i64,
    /// Random per-login value; anchors the CSRF token to this session
    pub nonce: String,
}

/// Issues and resolves signed session tokens
#[derive(Clone)]
pub struct SessionStore {
    config: SessionConfig,
    mac: HmacSha512,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Result<Self> {
        let mac = HmacSha512::new_from_slice(&config.secret_key)
            .map_err(|e| UserError::Configuration(format!("Invalid session secret: {}", e)))?;
        Ok(Self { config, mac })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Issue a new token for `identity`
    pub fn issue(&self, identity: &str) -> Result<String> {
        self.issue_at(identity, Utc::now().timestamp())
    }

    /// Issue a token with an explicit issue time
    pub fn issue_at(&self, identity: &str, iat: i64) -> Result<String> {
        if identity.is_empty() {
            return Err(UserError::InvalidCredentials);
        }

        let mut nonce = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut nonce);

        let claims = SessionClaims {
            sub: identity.to_string(),
            iat,
            nonce: hex::encode(nonce),
        };

        let payload = B64.encode(serde_json::to_vec(&claims)?);
        let signature = B64.encode(self.sign(payload.as_bytes()));

        debug!("Session token issued for {}", identity);
        Ok(format!("{}.{}", payload, signature))
    }

    /// Resolve a token to a principal; any failure yields `Anonymous`
    pub fn resolve(&self, token: Option<&str>) -> Principal {
        match self.resolve_claims(token) {
            Some(claims) => Principal::authenticated(claims.sub),
            None => Principal::anonymous(),
        }
    }

    /// Verify a token and return its claims
    pub fn resolve_claims(&self, token: Option<&str>) -> Option<SessionClaims> {
        self.resolve_claims_at(token, Utc::now().timestamp())
    }

    /// Verify a token against an explicit clock
    pub fn resolve_claims_at(&self, token: Option<&str>, now: i64) -> Option<SessionClaims> {
        let token = token.filter(|t| !t.is_empty())?;

        let Some((payload, signature)) = token.split_once('.') else {
            warn!("Session token malformed: missing signature");
            return None;
        };

        let Ok(signature) = B64.decode(signature) else {
            warn!("Session token malformed: signature is not base64");
            return None;
        };

        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        if mac.verify_slice(&signature).is_err() {
            warn!("Session token signature mismatch");
            return None;
        }

        let claims: SessionClaims = match B64
            .decode(payload)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        {
            Some(claims) => claims,
            None => {
                warn!("Session token payload could not be decoded");
                return None;
            }
        };

        if claims.sub.is_empty() || claims.nonce.is_empty() {
            warn!("Session token carries empty claims");
            return None;
        }

        if claims.iat > now.saturating_add(CLOCK_SKEW_SECONDS) {
            warn!("Session token issued in the future");
            return None;
        }

        if now.saturating_sub(claims.iat) > self.config.timeout_seconds {
            info!("Session token for {} has expired", claims.sub);
            return None;
        }

        Some(claims)
    }

    /// `Set-Cookie` value that stores `token` in the browser
    pub fn set_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite={}; Max-Age={}{}",
            self.config.cookie_name,
            token,
            self.config.same_site,
            self.config.timeout_seconds,
            self.secure_attr()
        )
    }

    /// `Set-Cookie` value that instructs the browser to discard the session.
    ///
    /// Already-issued tokens stay cryptographically valid until they expire
    /// or the secret is rotated.
    pub fn clear(&self) -> String {
        format!(
            "{}=; Path=/; HttpOnly; SameSite={}; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT{}",
            self.config.cookie_name,
            self.config.same_site,
            self.secure_attr()
        )
    }

    /// Find this store's cookie in a `Cookie` request header
    pub fn token_from_cookie_header<'a>(&self, header: &'a str) -> Option<&'a str> {
        header.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == self.config.cookie_name).then_some(value)
        })
    }

    fn secure_attr(&self) -> &'static str {
        if self.config.secure {
            "; Secure"
        } else {
            ""
        }
    }

    fn sign(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}
