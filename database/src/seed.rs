//! Sample journal entries for a fresh install

use chrono::NaiveDate;
use tracing::info;

use crate::storage::{Entry, EntryStore, NewEntry};
use crate::Result;

const SAMPLES: &[(&str, &str, (i32, u32, u32))] = &[
    (
        "TESTING",
        "T0day we m0ved past vanillaish servers and jumped int0 pyth0n web framew0rks. \
         We discussed view c0ntr0llers and r0utes, then pushed the app t0 her0ku. \
         As 0ur daily data structure we implemented d0uble ended queues.",
        (2016, 12, 18),
    ),
    (
        "Pyramid Views and Routes",
        "Today we moved past vanillaish servers and jumped into python web frameworks. \
         We discussed view controllers and routes, then pushed the app to heroku. \
         As our daily data structure we implemented double ended queues.",
        (2016, 12, 19),
    ),
    (
        "Binary Heaps and Templating with Jinja2",
        "Another big day! We are moving past hardcoded HTML into templates that get \
         filled in with the requested data. On top of that we learned about binary \
         heaps and implemented one. ALSO, we chose our projects.",
        (2016, 12, 20),
    ),
    (
        "CAN YOU HEAR ME NOW?",
        "Today was all about putting a real database behind the app. It has been \
         somewhat confusing, and the interactive shell is my best friend. The priority \
         queue was interesting too.",
        (2016, 12, 21),
    ),
    (
        "Starting to get testing going, still having problems.",
        "We were given the afternoon to catch up on our learning journals. Testing has \
         been a bit of a nightmare: my fixtures keep failing on unique ids and I spent \
         the evening on a wild goose chase. HELP.",
        (2016, 12, 22),
    ),
];

/// The fixed sample entries, oldest first
pub fn sample_entries() -> Vec<NewEntry> {
    SAMPLES
        .iter()
        .filter_map(|(title, body, (y, m, d))| {
            NaiveDate::from_ymd_opt(*y, *m, *d).map(|creation_date| NewEntry {
                title: (*title).to_string(),
                body: (*body).to_string(),
                creation_date,
            })
        })
        .collect()
}

/// Insert every sample entry into `store`
pub async fn seed_sample_entries(store: &dyn EntryStore) -> Result<Vec<Entry>> {
    let mut created = Vec::with_capacity(SAMPLES.len());
    for entry in sample_entries() {
        created.push(store.create(entry).await?);
    }

    info!("Seeded {} sample entries", created.len());
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_entry_table, Database, SqliteEntryStore};

    #[test]
    fn test_sample_entries_are_dated_in_order() {
        let entries = sample_entries();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].title, "TESTING");
        assert!(entries
            .windows(2)
            .all(|w| w[0].creation_date < w[1].creation_date));
    }

    #[tokio::test]
    async fn test_seed_into_store() {
        let db = Database::in_memory().await.unwrap();
        create_entry_table(&db).await.unwrap();
        let store = SqliteEntryStore::new(db);

        let created = seed_sample_entries(&store).await.unwrap();
        assert_eq!(created.len(), 5);
        assert_eq!(store.count().await.unwrap(), 5);

        let last = store.list().await.unwrap().pop().unwrap();
        assert_eq!(
            last.title,
            "Starting to get testing going, still having problems."
        );
    }
}
