use chrono::{DateTime, NaiveDate, Utc};
use content::EntryViewModel;
use database::Entry;
use serde::{Deserialize, Serialize};

/// Home page: the newest entry featured, the rest in two columns
#[derive(Debug, Serialize, Deserialize)]
pub struct HomeView {
    pub view: String,
    #[serde(flatten)]
    pub entries: EntryViewModel<Entry>,
    /// Default date for the inline new-entry form
    pub creation_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
}

/// New-entry form
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateView {
    pub view: String,
    pub creation_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
}

/// A single entry
#[derive(Debug, Serialize, Deserialize)]
pub struct DetailView {
    pub view: String,
    pub entry: Entry,
    /// Last edit, formatted like `Dec 22, 2016`
    pub edit_date: Option<String>,
}

/// Edit form pre-filled with the entry's current content
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateView {
    pub view: String,
    pub id: i64,
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
}

/// Login form; `failed` is set after rejected credentials
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginView {
    pub view: String,
    pub failed: bool,
    pub authenticated: bool,
}

/// Submitted by the new-entry forms
#[derive(Debug, Default, Deserialize)]
pub struct EntryForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub creation_date: String,
}

/// Submitted by the edit form
#[derive(Debug, Default, Deserialize)]
pub struct UpdateForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseHealth {
    pub connected: bool,
    pub message: String,
}
