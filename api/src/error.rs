use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// API Error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// The state-changing request carried no valid anti-forgery token
    #[error("Missing or invalid CSRF token")]
    CsrfRejected,

    #[error("Forbidden")]
    Forbidden,

    /// Message is shown to the caller as-is
    #[error("{0}")]
    EntryNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error view rendered for every failed request
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorView {
    pub view: String,
    pub status: u16,
    pub code: String,
    pub message: String,
}

impl ApiError {
    /// Convert error to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::CsrfRejected => StatusCode::BAD_REQUEST,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::EntryNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for the error type
    pub fn error_code(&self) -> &str {
        match self {
            ApiError::CsrfRejected => "CSRF_REJECTED",
            ApiError::Forbidden => "FORBIDDEN",
            ApiError::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Database(_) => "DATABASE_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Name of the template view that renders this error
    pub fn view_name(&self) -> &str {
        match self.status_code() {
            StatusCode::BAD_REQUEST => "bad_request",
            StatusCode::FORBIDDEN => "forbidden",
            StatusCode::NOT_FOUND => "not_found",
            _ => "error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal details stay in the log.
        let message = match &self {
            ApiError::Database(_) | ApiError::Internal(_) => {
                error!("Request failed: {}", self);
                "Something went wrong".to_string()
            }
            _ => self.to_string(),
        };

        let view = ErrorView {
            view: self.view_name().to_string(),
            status: status.as_u16(),
            code: self.error_code().to_string(),
            message,
        };

        (status, Json(view)).into_response()
    }
}

/// Convert database errors to API errors
impl From<database::DatabaseError> for ApiError {
    fn from(err: database::DatabaseError) -> Self {
        ApiError::Database(err.to_string())
    }
}

impl From<content::ContentError> for ApiError {
    fn from(err: content::ContentError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<user::UserError> for ApiError {
    fn from(err: user::UserError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
