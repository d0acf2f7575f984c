use axum::{extract::State, Extension, Json};
use tracing::debug;
use user::AuthState;

use super::{csrf_token_for, today};
use crate::{error::ApiResult, models::HomeView, AppState};

/// Home page with the newest entry featured
///
/// GET /
pub async fn home_view(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthState>,
) -> ApiResult<Json<HomeView>> {
    let entries = state.store.list().await?;
    debug!("Rendering home view with {} entries", entries.len());

    Ok(Json(HomeView {
        view: "home".to_string(),
        entries: content::partition(&entries),
        creation_date: today(),
        csrf_token: csrf_token_for(&state, &auth),
    }))
}
