use crate::{Database, DatabaseError, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

const ENTRY_TABLE: &str = "entries";

const CREATE_ENTRY_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        body TEXT NOT NULL DEFAULT '',
        creation_date TEXT NOT NULL,
        edit_date TEXT
    )
"#;

/// Database initialization configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Whether to create tables on initialization
    pub create_tables: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data").join("journal.db"),
            create_tables: true,
        }
    }
}

impl DatabaseConfig {
    /// Create a new database configuration with a specific database path
    pub fn new_with_path(database_path: PathBuf) -> Self {
        Self {
            database_path,
            ..Self::default()
        }
    }

    /// Set whether to create tables on initialization
    pub fn with_create_tables(mut self, create: bool) -> Self {
        self.create_tables = create;
        self
    }
}

/// Initialize the database with the given configuration
pub async fn initialize_database(config: DatabaseConfig) -> Result<Arc<Database>> {
    info!("Initializing database with configuration");

    let db_path_str = config
        .database_path
        .to_str()
        .ok_or_else(|| DatabaseError::InvalidPath(format!("{:?}", config.database_path)))?;

    let db = Database::new(db_path_str).await?;
    info!("Database connection established");

    if config.create_tables {
        create_entry_table(&db).await?;
    }

    Ok(Arc::new(db))
}

/// Create the entry table if it does not exist yet
pub async fn create_entry_table(db: &Database) -> Result<()> {
    sqlx::query(CREATE_ENTRY_TABLE)
        .execute(db.pool())
        .await
        .map_err(|e| DatabaseError::TableCreation(format!("{}: {}", ENTRY_TABLE, e)))?;

    info!("Entry table ready");
    Ok(())
}

/// Drop and recreate the entry table, discarding every entry
pub async fn reset_schema(db: &Database) -> Result<()> {
    info!("Resetting entry schema");

    sqlx::query("DROP TABLE IF EXISTS entries")
        .execute(db.pool())
        .await?;
    create_entry_table(db).await
}
