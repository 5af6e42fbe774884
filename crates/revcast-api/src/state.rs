//! Application state shared across handlers.

use revcast_orchestrator::ForecastOrchestrator;
use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ForecastOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Arc<ForecastOrchestrator>) -> Self {
        Self { orchestrator }
    }
}
