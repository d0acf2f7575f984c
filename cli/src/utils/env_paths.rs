use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Environment-based path configuration
#[derive(Debug, Clone)]
pub struct EnvPaths {
    pub data_path: PathBuf,
    database_override: Option<PathBuf>,
}

impl EnvPaths {
    /// Load paths from environment variables with defaults
    pub fn load() -> Result<Self> {
        // Try to load .env file if it exists in current directory
        let base = env::current_dir().context("Failed to get current directory")?;
        let env_file = base.join(".env");
        if env_file.exists() {
            dotenv::from_path(&env_file).ok();
        }

        Ok(Self {
            data_path: Self::get_path_from_env("DATA_PATH", "./data", &base),
            database_override: env::var("DATABASE_PATH")
                .ok()
                .filter(|p| !p.is_empty())
                .map(|p| Self::resolve(PathBuf::from(p), &base)),
        })
    }

    /// Get a path from environment variable or use default
    fn get_path_from_env(var_name: &str, default: &str, base_dir: &Path) -> PathBuf {
        let path_str = env::var(var_name).unwrap_or_else(|_| default.to_string());
        Self::resolve(PathBuf::from(path_str), base_dir)
    }

    /// Relative paths are taken from the base directory
    fn resolve(path: PathBuf, base_dir: &Path) -> PathBuf {
        if path.is_relative() {
            base_dir.join(path)
        } else {
            path
        }
    }

    /// Get the database path: `DATABASE_PATH`, else `<data>/journal.db`
    pub fn database_path(&self) -> PathBuf {
        self.database_override
            .clone()
            .unwrap_or_else(|| self.data_path.join("journal.db"))
    }
}
