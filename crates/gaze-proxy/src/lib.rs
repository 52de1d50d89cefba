//! Analysis proxy for the gaze workspace.
//!
//! Accepts a batch of data-URI-encoded frames, makes exactly one call to
//! the configured `GazeModel`, and returns the normalized judgment list.
//! Validation failures are 400s that never reach the model; model failures
//! are generic 500s.

pub mod service;
pub mod wire;

pub use service::{AppState, bind, router};
pub use wire::{AnalyzeRequest, ErrorBody};
