//! # Content Crate
//!
//! Content rules for journal entries that do not depend on storage or HTTP:
//!
//! - **Home layout**: split entries into a featured entry and two columns
//! - **Form dates**: parse `YYYY-MM-DD` submissions and format display dates
//! - **Validation**: reject entries without a usable title
//!
//! ## Usage
//!
//! ```rust
//! use content::{partition, parse_creation_date};
//!
//! let view = partition(&["first", "second", "third"]);
//! assert_eq!(view.latest, Some("third"));
//! assert_eq!(view.left, vec!["second"]);
//! assert_eq!(view.right, vec!["first"]);
//!
//! assert!(parse_creation_date("2016-12-22").is_ok());
//! ```

pub mod error;
pub mod partition;
pub mod utils;

// Re-export commonly used functions at the crate root
pub use error::ContentError;
pub use partition::{partition, EntryViewModel};
pub use utils::{format_display_date, parse_creation_date, truncate_text, validate_title};

/// Result type for content operations
pub type Result<T> = std::result::Result<T, ContentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_of_dated_titles() {
        let titles = vec!["TESTING", "Pyramid Views and Routes", "CAN YOU HEAR ME NOW?"];
        let view = partition(&titles);
        assert_eq!(view.latest, Some("CAN YOU HEAR ME NOW?"));
        assert_eq!(view.left, vec!["Pyramid Views and Routes"]);
        assert_eq!(view.right, vec!["TESTING"]);
    }
}
