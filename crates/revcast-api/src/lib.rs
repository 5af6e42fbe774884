//! HTTP API server for Revcast.

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use routes::build_app;
pub use state::AppState;
