use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::Redirect,
    Extension, Form, Json,
};
use content::{format_display_date, parse_creation_date, validate_title};
use database::{EntryUpdate, NewEntry};
use tracing::info;
use user::AuthState;

use super::{csrf_token_for, today};
use crate::{
    error::{ApiError, ApiResult},
    models::{CreateView, DetailView, EntryForm, UpdateForm, UpdateView},
    AppState,
};

const DETAIL_NOT_FOUND: &str = "This entry does not exist...yet";
const EDIT_NOT_FOUND: &str = "You cannot edit that which does not exist";

/// Ids that do not parse are reported exactly like unknown ids
fn parse_id(raw: &str, not_found: &str) -> ApiResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::EntryNotFound(not_found.to_string()))
}

/// Show a single entry
///
/// GET /journal/{id}
pub async fn detail_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DetailView>> {
    let id = parse_id(&id, DETAIL_NOT_FOUND)?;
    let entry = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::EntryNotFound(DETAIL_NOT_FOUND.to_string()))?;

    Ok(Json(DetailView {
        view: "detail".to_string(),
        edit_date: entry.edit_date.map(format_display_date),
        entry,
    }))
}

/// New-entry form
///
/// GET /journal/new-entry
pub async fn create_form(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthState>,
) -> Json<CreateView> {
    Json(CreateView {
        view: "create".to_string(),
        creation_date: today(),
        csrf_token: csrf_token_for(&state, &auth),
    })
}

/// Store a new entry and return to the home page
///
/// POST /journal/new-entry and POST /
pub async fn create_entry(
    State(state): State<AppState>,
    form: Result<Form<EntryForm>, FormRejection>,
) -> ApiResult<Redirect> {
    let Form(form) = form?;

    let entry = NewEntry {
        title: validate_title(&form.title)?,
        body: form.body,
        creation_date: parse_creation_date(&form.creation_date)?,
    };

    let created = state.store.create(entry).await?;
    info!("Journal entry {} created", created.id);

    Ok(Redirect::to("/"))
}

/// Edit form for an existing entry
///
/// GET /journal/{id}/edit-entry
pub async fn update_form(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UpdateView>> {
    let id = parse_id(&id, EDIT_NOT_FOUND)?;
    let entry = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::EntryNotFound(EDIT_NOT_FOUND.to_string()))?;

    Ok(Json(UpdateView {
        view: "update".to_string(),
        id: entry.id,
        title: entry.title,
        body: entry.body,
        csrf_token: csrf_token_for(&state, &auth),
    }))
}

/// Replace an entry's title and body, stamping today's edit date
///
/// POST /journal/{id}/edit-entry
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: Result<Form<UpdateForm>, FormRejection>,
) -> ApiResult<Redirect> {
    let id = parse_id(&id, EDIT_NOT_FOUND)?;
    let Form(form) = form?;

    let update = EntryUpdate {
        title: validate_title(&form.title)?,
        body: form.body,
    };

    let updated = state
        .store
        .update(id, update, today())
        .await?
        .ok_or_else(|| ApiError::EntryNotFound(EDIT_NOT_FOUND.to_string()))?;
    info!("Journal entry {} updated", updated.id);

    Ok(Redirect::to(&format!("/journal/{}", updated.id)))
}
