use gaze_camera::CameraError;
use std::fmt;

#[derive(Debug)]
pub enum CaptureError {
    /// The camera failed before any recording happened.
    Camera(CameraError),
    /// Fallback extraction could not produce any frames.
    Extract(String),
    /// The recording attempt was cancelled before the deadline.
    Cancelled,
    /// A recorder task panicked or was aborted.
    Task(String),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Camera(err) => write!(f, "camera error: {err}"),
            CaptureError::Extract(msg) => write!(f, "frame extraction failed: {msg}"),
            CaptureError::Cancelled => write!(f, "recording cancelled before the deadline"),
            CaptureError::Task(msg) => write!(f, "recorder task failed: {msg}"),
        }
    }
}

impl std::error::Error for CaptureError {}

impl From<CameraError> for CaptureError {
    fn from(err: CameraError) -> Self {
        CaptureError::Camera(err)
    }
}
