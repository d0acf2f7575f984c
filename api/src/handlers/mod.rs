pub mod auth;
pub mod entry;
pub mod health;
pub mod home;

use chrono::{Local, NaiveDate};
use user::AuthState;

use crate::AppState;

/// Today's date in the server's local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The CSRF token to embed in a form, when the caller has a session
pub(crate) fn csrf_token_for(state: &AppState, auth: &AuthState) -> Option<String> {
    auth.session
        .as_ref()
        .map(|session| state.users.csrf_guard().issue(session))
}
