//! Home page layout: one featured entry plus two balanced columns

use serde::{Deserialize, Serialize};

/// Render-ready layout of the journal's entries.
///
/// `latest` is the most recent entry; the rest alternate between the two
/// columns, starting with `left`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryViewModel<T> {
    pub latest: Option<T>,
    #[serde(rename = "left_entries")]
    pub left: Vec<T>,
    #[serde(rename = "right_entries")]
    pub right: Vec<T>,
}

impl<T> EntryViewModel<T> {
    pub fn empty() -> Self {
        Self {
            latest: None,
            left: Vec::new(),
            right: Vec::new(),
        }
    }

    /// Total number of entries placed in the layout
    pub fn len(&self) -> usize {
        usize::from(self.latest.is_some()) + self.left.len() + self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_none()
    }
}

impl<T> Default for EntryViewModel<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Split entries, ordered oldest first, into the home page layout.
///
/// Walking newest first: index 0 is `latest`, odd indices go to `left`, even
/// indices to `right`. The parity must not change; the rendered layout
/// depends on it.
pub fn partition<T: Clone>(entries: &[T]) -> EntryViewModel<T> {
    let mut newest_first = entries.iter().rev();

    let Some(latest) = newest_first.next() else {
        return EntryViewModel::empty();
    };

    let mut view = EntryViewModel {
        latest: Some(latest.clone()),
        left: Vec::with_capacity(entries.len() / 2),
        right: Vec::with_capacity(entries.len() / 2),
    };

    for (i, entry) in newest_first.enumerate().map(|(i, e)| (i + 1, e)) {
        if i % 2 == 1 {
            view.left.push(entry.clone());
        } else {
            view.right.push(entry.clone());
        }
    }

    view
}
