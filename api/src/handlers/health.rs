use axum::{extract::State, Json};
use chrono::Utc;
use tracing::info;

use crate::{
    models::{DatabaseHealth, HealthResponse},
    AppState,
};

/// Health check endpoint
///
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    info!("Health check requested");

    let db_health = match state.store.count().await {
        Ok(count) => DatabaseHealth {
            connected: true,
            message: format!("Database connection successful ({} entries)", count),
        },
        Err(e) => DatabaseHealth {
            connected: false,
            message: format!("Database connection failed: {}", e),
        },
    };

    Json(HealthResponse {
        status: if db_health.connected {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        database: db_health,
    })
}
