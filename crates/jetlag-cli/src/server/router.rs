//! Router configuration for the HTTP API.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::AppState;

/// Create the application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Browser frontends are served from arbitrary origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/timezones", get(handlers::list_timezones))
        .route("/calculate", post(handlers::calculate))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
