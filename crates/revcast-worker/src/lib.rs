//! Forecast computation worker.
//!
//! Consumes computation requests from the dispatch channel, runs the
//! forecast model, persists the canonical result, and replies inline.
//! Workers are decoupled from request intake and scale horizontally via
//! the shared queue group.

pub mod model;
mod worker;

pub use model::{BaselineModel, ForecastModel};
pub use worker::ComputeWorker;
