pub mod logging;

use anyhow::Context;
use api::{ApiConfig, AppState};
use authz::AuthzEngine;
use database::{initialize_database, DatabaseConfig, SqliteEntryStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use user::{AuthConfig, UserManager};

/// Environment variable names read by the server binary
pub struct EnvKeys;

impl EnvKeys {
    pub const DATA_PATH: &'static str = "DATA_PATH";
    pub const DATABASE_PATH: &'static str = "DATABASE_PATH";
    pub const ACL_PATH: &'static str = "JOURNAL_ACL_PATH";
    pub const HOST: &'static str = "JOURNAL_HOST";
    pub const PORT: &'static str = "JOURNAL_PORT";
}

/// Filesystem locations used by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvPaths {
    pub data_path: PathBuf,
    pub database_path: PathBuf,
    /// Optional JSON ACL replacing the built-in policy
    pub acl_path: Option<PathBuf>,
}

impl EnvPaths {
    /// Load paths from environment variables, reading `.env` first
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load paths through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_path = PathBuf::from(
            lookup(EnvKeys::DATA_PATH).unwrap_or_else(|| "./data".to_string()),
        );
        let database_path = lookup(EnvKeys::DATABASE_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_path.join("journal.db"));
        let acl_path = lookup(EnvKeys::ACL_PATH)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Self {
            data_path,
            database_path,
            acl_path,
        }
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_path.join("logs")
    }
}

/// Listener settings from `JOURNAL_HOST` / `JOURNAL_PORT`
pub fn api_config_from_lookup<F>(lookup: F) -> anyhow::Result<ApiConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = ApiConfig::default();
    if let Some(host) = lookup(EnvKeys::HOST) {
        config = config.with_host(host);
    }
    if let Some(port) = lookup(EnvKeys::PORT) {
        let port = port
            .parse::<u16>()
            .with_context(|| format!("{} must be a port number, got {:?}", EnvKeys::PORT, port))?;
        config = config.with_port(port);
    }
    Ok(config)
}

/// The authorization gate: the ACL file when configured, else the default policy
pub fn load_authz(acl_path: Option<&Path>) -> anyhow::Result<AuthzEngine> {
    match acl_path {
        Some(path) => AuthzEngine::from_file(path)
            .with_context(|| format!("Failed to load ACL from {:?}", path)),
        None => {
            tracing::info!("Using default ACL");
            Ok(AuthzEngine::default())
        }
    }
}

/// Assemble the application state from configuration.
///
/// Any missing or invalid authentication setting is returned as an error
/// before the database is touched.
pub async fn build_state(env_paths: &EnvPaths, auth: AuthConfig) -> anyhow::Result<AppState> {
    let users = UserManager::new(auth).context("Invalid authentication configuration")?;
    let authz = load_authz(env_paths.acl_path.as_deref())?;

    let db = initialize_database(DatabaseConfig::new_with_path(env_paths.database_path.clone()))
        .await
        .context("Failed to initialize database")?;
    let store = Arc::new(SqliteEntryStore::new(db.as_ref().clone()));

    Ok(AppState::new(store, users, authz))
}

/// Load configuration, open the database and serve until shutdown
pub async fn run(env_paths: EnvPaths) -> anyhow::Result<()> {
    tracing::info!("=== Journal starting up ===");

    let auth = AuthConfig::from_env().context("Invalid authentication configuration")?;
    let api_config = api_config_from_lookup(|key| std::env::var(key).ok())?;
    let state = build_state(&env_paths, auth).await?;

    api::start_server_with_config(state, api_config)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    logging::log_shutdown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_paths_defaults() {
        let paths = EnvPaths::from_lookup(lookup(&[]));
        assert_eq!(paths.data_path, PathBuf::from("./data"));
        assert_eq!(paths.database_path, PathBuf::from("./data/journal.db"));
        assert_eq!(paths.logs_dir(), PathBuf::from("./data/logs"));
        assert!(paths.acl_path.is_none());
    }

    #[test]
    fn test_env_paths_overrides() {
        let paths = EnvPaths::from_lookup(lookup(&[
            ("DATA_PATH", "/srv/journal"),
            ("DATABASE_PATH", "/var/lib/journal.db"),
            ("JOURNAL_ACL_PATH", "/etc/journal/acl.json"),
        ]));
        assert_eq!(paths.data_path, PathBuf::from("/srv/journal"));
        assert_eq!(paths.database_path, PathBuf::from("/var/lib/journal.db"));
        assert_eq!(paths.acl_path, Some(PathBuf::from("/etc/journal/acl.json")));
    }

    #[test]
    fn test_api_config_from_lookup() {
        let config = api_config_from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.address(), "127.0.0.1:6543");

        let config =
            api_config_from_lookup(lookup(&[("JOURNAL_HOST", "0.0.0.0"), ("JOURNAL_PORT", "8080")]))
                .unwrap();
        assert_eq!(config.address(), "0.0.0.0:8080");

        assert!(api_config_from_lookup(lookup(&[("JOURNAL_PORT", "lots")])).is_err());
    }

    #[test]
    fn test_load_authz_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("acl.json");
        std::fs::write(
            &path,
            r#"[{"effect": "allow", "principal": {"identity": "ffowler"}, "capability": "admin"}]"#,
        )
        .unwrap();

        let engine = load_authz(Some(&path)).unwrap();
        assert_eq!(engine.acl().len(), 1);

        assert!(load_authz(Some(&dir.path().join("missing.json"))).is_err());
        assert_eq!(load_authz(None).unwrap().acl().len(), 1);
    }

    #[tokio::test]
    async fn test_build_state_rejects_bad_auth_before_database() {
        let dir = TempDir::new().unwrap();
        let paths = EnvPaths::from_lookup(lookup(&[(
            "DATA_PATH",
            dir.path().to_str().unwrap(),
        )]));
        let auth = AuthConfig {
            admin_username: "ffowler".to_string(),
            admin_password_hash: "not-a-phc-string".to_string(),
            session: user::SessionConfig::new(b"donttellanyone-ever".to_vec()).unwrap(),
            csrf_enabled: true,
        };

        assert!(build_state(&paths, auth).await.is_err());
        assert!(!paths.database_path.exists());
    }
}
