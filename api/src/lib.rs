use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use authz::AuthzEngine;
use database::EntryStore;
use user::UserManager;

pub mod error;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod routes;
pub mod server;


use handlers::{auth, entry, health, home};
pub use routes::{RouteRule, RouteTable};
// Re-export server functions for convenience
pub use server::{start_server_with_config, ApiConfig};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntryStore>,
    pub users: UserManager,
    pub authz: Arc<AuthzEngine>,
    pub routes: Arc<RouteTable>,
}

impl AppState {
    /// State over the journal's route declarations
    pub fn new(store: Arc<dyn EntryStore>, users: UserManager, authz: AuthzEngine) -> Self {
        Self {
            store,
            users,
            authz: Arc::new(authz),
            routes: Arc::new(RouteTable::journal()),
        }
    }

    /// Replace the route declarations
    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = Arc::new(routes);
        self
    }
}

/// Create the journal router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::home_view).post(entry::create_entry))
        .route(
            "/journal/new-entry",
            get(entry::create_form).post(entry::create_entry),
        )
        .route("/journal/:id", get(entry::detail_view))
        .route(
            "/journal/:id/edit-entry",
            get(entry::update_form).post(entry::update_entry),
        )
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/health", get(health::health_check))
        // Only matched routes reach the pipeline; unknown paths fall through to 404.
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            pipeline::request_pipeline,
        ))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
