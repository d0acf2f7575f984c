//! Request pipeline middleware
//!
//! Runs in front of every routed handler, in this order:
//!
//! 1. Look up the route's declaration; undeclared routes are refused (403)
//! 2. Resolve the session cookie to a principal (never fails, degrades to
//!    anonymous)
//! 3. If the route requires it, validate the CSRF token (400 on failure)
//! 4. If the route names a capability, consult the authorization gate (403)
//! 5. Hand the resolved [`AuthState`] to the handler via request extensions
//!
//! The CSRF check precedes authorization so a forged or token-less
//! submission is rejected before anything else looks at it; neither step
//! touches the entry store.

use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, MatchedPath, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
    Form,
};
use serde::Deserialize;
use tracing::{debug, info, warn};
use user::auth::{CSRF_FIELD, CSRF_HEADER};
use user::AuthState;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Largest form body buffered while looking for the CSRF field
const MAX_FORM_BYTES: usize = 1024 * 1024;

// serde needs a literal here; must stay equal to `CSRF_FIELD`.
#[derive(Debug, Default, Deserialize)]
struct CsrfField {
    #[serde(rename = "csrf_token", default)]
    token: Option<String>,
}

/// Authenticate, CSRF-check and authorize a routed request
pub async fn request_pipeline(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let method = request.method().clone();
    let Some(matched) = request.extensions().get::<MatchedPath>().cloned() else {
        warn!("PIPELINE: no matched path for {} {}", method, request.uri().path());
        return Err(ApiError::Forbidden);
    };

    let Some(route) = state.routes.lookup(&method, matched.as_str()).cloned() else {
        warn!("PIPELINE: undeclared route {} {}", method, matched.as_str());
        return Err(ApiError::Forbidden);
    };

    let auth = resolve_auth(&state, &request);
    debug!(
        "PIPELINE: {} {} as {}",
        method,
        matched.as_str(),
        auth.principal
    );

    let mut request = request;
    if route.csrf_required && state.users.csrf_guard().is_enabled() {
        let (submitted, rebuilt) = extract_csrf_token(request).await?;
        request = rebuilt;

        let valid = state
            .users
            .csrf_guard()
            .validate(auth.session.as_ref(), submitted.as_deref());
        if !valid {
            warn!(
                "PIPELINE: CSRF check failed for {} {} as {}",
                method,
                matched.as_str(),
                auth.principal
            );
            return Err(ApiError::CsrfRejected);
        }
    }

    if let Some(capability) = &route.capability {
        let decision = state.authz.authorize(&auth.principal, capability);
        if !decision.is_allowed() {
            info!(
                "PIPELINE: access denied for {} on {} {}",
                auth.principal,
                method,
                matched.as_str()
            );
            return Err(ApiError::Forbidden);
        }
    }

    request.extensions_mut().insert(auth);
    Ok(next.run(request).await)
}

/// Resolve the session cookie on `request`; any failure is anonymous
pub fn resolve_auth(state: &AppState, request: &Request) -> AuthState {
    let store = state.users.session_store();
    let token = request
        .headers()
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| store.token_from_cookie_header(value));

    AuthState::from_claims(store.resolve_claims(token))
}

/// Find the submitted CSRF token, preferring the header over the form field.
///
/// Reading the form field consumes the body, so the request is rebuilt from
/// the buffered bytes before being returned.
async fn extract_csrf_token(request: Request) -> ApiResult<(Option<String>, Request)> {
    if let Some(token) = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|value| value.to_str().ok())
    {
        return Ok((Some(token.to_string()), request));
    }

    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, MAX_FORM_BYTES)
        .await
        .map_err(|_| ApiError::Validation("Request body too large".to_string()))?;

    let token = form_token(&parts, bytes.clone()).await;
    debug!(
        "PIPELINE: {} field {}",
        CSRF_FIELD,
        if token.is_some() { "present" } else { "absent" }
    );

    Ok((token, Request::from_parts(parts, Body::from(bytes))))
}

async fn form_token(parts: &Parts, bytes: Bytes) -> Option<String> {
    let mut form_request = Request::builder()
        .method(parts.method.clone())
        .uri(parts.uri.clone());
    if let Some(content_type) = parts.headers.get(header::CONTENT_TYPE) {
        form_request = form_request.header(header::CONTENT_TYPE, content_type.clone());
    }
    let form_request = form_request.body(Body::from(bytes)).ok()?;

    Form::<CsrfField>::from_request(form_request, &())
        .await
        .ok()
        .and_then(|Form(field)| field.token)
}
