//! Camera capture abstraction for the gaze workspace.
//!
//! This crate provides a unified `Camera` trait for async still capture,
//! with a V4L2 backend that negotiates MJPEG and delivers encoded JPEG
//! frames without re-encoding.

pub mod config;
pub mod error;
pub mod traits;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use config::CameraConfig;
pub use error::CameraError;
pub use traits::Camera;

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Camera;
