use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Database, Result};

const ENTRY_COLUMNS: &str = "id, title, body, creation_date, edit_date";

/// A journal entry as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Entry {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub creation_date: NaiveDate,
    pub edit_date: Option<NaiveDate>,
}

/// Fields for a new entry; the id is assigned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub title: String,
    pub body: String,
    pub creation_date: NaiveDate,
}

/// Replacement title and body for an existing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryUpdate {
    pub title: String,
    pub body: String,
}

/// Persistence for journal entries
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// All entries in ascending id order
    async fn list(&self) -> Result<Vec<Entry>>;

    async fn get(&self, id: i64) -> Result<Option<Entry>>;

    async fn create(&self, entry: NewEntry) -> Result<Entry>;

    /// Replace title and body and stamp `edit_date`; `None` when `id` is unknown
    async fn update(&self, id: i64, update: EntryUpdate, edit_date: NaiveDate)
        -> Result<Option<Entry>>;

    async fn count(&self) -> Result<i64>;
}

/// SQLite-backed entry store
#[derive(Debug, Clone)]
pub struct SqliteEntryStore {
    db: Database,
}

impl SqliteEntryStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl EntryStore for SqliteEntryStore {
    async fn list(&self) -> Result<Vec<Entry>> {
        let sql = format!("SELECT {} FROM entries ORDER BY id ASC", ENTRY_COLUMNS);
        let entries = sqlx::query_as::<_, Entry>(&sql)
            .fetch_all(self.db.pool())
            .await?;

        debug!("Listed {} entries", entries.len());
        Ok(entries)
    }

    async fn get(&self, id: i64) -> Result<Option<Entry>> {
        let sql = format!("SELECT {} FROM entries WHERE id = ?", ENTRY_COLUMNS);
        let entry = sqlx::query_as::<_, Entry>(&sql)
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(entry)
    }

    async fn create(&self, entry: NewEntry) -> Result<Entry> {
        let sql = format!(
            "INSERT INTO entries (title, body, creation_date) VALUES (?, ?, ?) RETURNING {}",
            ENTRY_COLUMNS
        );
        let created = sqlx::query_as::<_, Entry>(&sql)
            .bind(&entry.title)
            .bind(&entry.body)
            .bind(entry.creation_date)
            .fetch_one(self.db.pool())
            .await?;

        info!("Created entry with id: {}", created.id);
        Ok(created)
    }

    async fn update(
        &self,
        id: i64,
        update: EntryUpdate,
        edit_date: NaiveDate,
    ) -> Result<Option<Entry>> {
        // A single statement: concurrent edits resolve as last writer wins.
        let sql = format!(
            "UPDATE entries SET title = ?, body = ?, edit_date = ? WHERE id = ? RETURNING {}",
            ENTRY_COLUMNS
        );
        let updated = sqlx::query_as::<_, Entry>(&sql)
            .bind(&update.title)
            .bind(&update.body)
            .bind(edit_date)
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        match &updated {
            Some(_) => info!("Updated entry with id: {}", id),
            None => debug!("No entry with id {} to update", id),
        }
        Ok(updated)
    }

    async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM entries")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }
}
