//! Shared foundation for the gaze workspace.
//!
//! Provides the stdout logger used by every binary and the data-URI codec
//! that moves encoded frames between the capture pipeline, the proxy, and
//! the hosted model.

pub mod data_uri;
pub mod logging;

pub use data_uri::DataUriError;
pub use logging::{StdoutLogger, init_stdout_logger};

// Re-export log so downstream crates can use gaze_base::log::*
pub use log;
