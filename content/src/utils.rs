//! Utility functions for entry content

use chrono::NaiveDate;

use crate::error::ContentError;

/// Date format used by the entry forms
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date format shown beside an edited entry
pub const DISPLAY_DATE_FORMAT: &str = "%b %d, %Y";

/// Parse a `creation_date` form value
///
/// # Example
///
/// ```rust
/// use content::parse_creation_date;
///
/// let date = parse_creation_date("2016-12-18").unwrap();
/// assert_eq!(date.to_string(), "2016-12-18");
/// assert!(parse_creation_date("Dec 18, 2016").is_err());
/// ```
pub fn parse_creation_date(value: &str) -> Result<NaiveDate, ContentError> {
    NaiveDate::parse_from_str(value.trim(), FORM_DATE_FORMAT)
        .map_err(|_| ContentError::InvalidDate(value.to_string()))
}

/// Render a date the way the detail view shows edit dates, e.g. `Dec 18, 2016`
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Trim a submitted title and reject it if nothing is left
pub fn validate_title(title: &str) -> Result<String, ContentError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ContentError::ValidationError(
            "Title cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Truncate text to a maximum length, adding ellipsis if truncated
///
/// Cuts on a character boundary so multi-byte text is never split.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    if max_length <= 3 {
        return "...".to_string();
    }
    let kept: String = text.chars().take(max_length - 3).collect();
    format!("{}...", kept)
}
