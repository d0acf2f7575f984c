use anyhow::{Context, Result};
use colored::*;
use database::{
    initialize_database, reset_schema, seed::seed_sample_entries, DatabaseConfig, EntryStore,
    SqliteEntryStore,
};
use std::path::PathBuf;

const TITLE_WIDTH: usize = 48;

/// Drop and recreate the entry table, optionally loading the sample entries
pub async fn execute(database_path: PathBuf, sample: bool) -> Result<()> {
    let config = DatabaseConfig::new_with_path(database_path.clone()).with_create_tables(false);
    let db = initialize_database(config)
        .await
        .with_context(|| format!("Failed to open database at {}", database_path.display()))?;

    reset_schema(&db).await.context("Failed to reset schema")?;

    let store = SqliteEntryStore::new(db.as_ref().clone());
    if sample {
        for entry in seed_sample_entries(&store).await? {
            println!(
                "  {} {}",
                format!("#{}", entry.id).cyan(),
                content::truncate_text(&entry.title, TITLE_WIDTH)
            );
        }
    }

    let count = store.count().await?;
    println!(
        "{} {} ({} entries)",
        "Initialized".green().bold(),
        database_path.display(),
        count
    );

    Ok(())
}
