//! Login and logout for the single admin identity

use axum::{
    extract::{rejection::FormRejection, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
    Extension, Form, Json,
};
use tracing::{info, warn};
use user::{AuthState, Credentials};

use crate::{
    error::{ApiError, ApiResult},
    models::LoginView,
    AppState,
};

fn login_view(failed: bool, authenticated: bool) -> Json<LoginView> {
    Json(LoginView {
        view: "login".to_string(),
        failed,
        authenticated,
    })
}

/// Login form
///
/// GET /login
pub async fn login_form(Extension(auth): Extension<AuthState>) -> Json<LoginView> {
    login_view(false, auth.is_authenticated())
}

/// Check submitted credentials and start a session on success
///
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    form: Result<Form<Credentials>, FormRejection>,
) -> ApiResult<Response> {
    let Form(credentials) = form?;
    let username = credentials.username.clone();

    // Password hashing is CPU-bound; keep it off the async workers.
    let users = state.users.clone();
    let verified = tokio::task::spawn_blocking(move || {
        users
            .verifier()
            .verify(&credentials.username, &credentials.password)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Credential check aborted: {}", e)))?;

    if !verified {
        warn!("Login rejected for {:?}", username);
        return Ok(login_view(true, false).into_response());
    }

    let store = state.users.session_store();
    let token = store.issue(&username)?;
    info!("Login succeeded for {}", username);

    Ok((
        [(header::SET_COOKIE, store.set_cookie(&token))],
        Redirect::to("/"),
    )
        .into_response())
}

/// Drop the session cookie and return home
///
/// GET /logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthState>,
) -> impl IntoResponse {
    if let Some(identity) = auth.principal.identity() {
        info!("Logout for {}", identity);
    }

    (
        [(header::SET_COOKIE, state.users.session_store().clear())],
        Redirect::to("/"),
    )
}
