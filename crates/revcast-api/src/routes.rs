//! API route definitions.

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::handlers::{forecasts, health};
use crate::middleware;
use crate::state::AppState;

/// Create the main API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(state)
}

/// Router with middleware layers applied.
pub fn build_app(state: Arc<AppState>) -> Router {
    create_router(state)
        .layer(axum::middleware::from_fn(middleware::request_id))
        .layer(middleware::cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/forecasts", forecast_routes())
}

fn forecast_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/simple", post(forecasts::submit_simple))
        .route("/complex", post(forecasts::submit_complex))
        .route("/{id}", get(forecasts::get_forecast))
}
