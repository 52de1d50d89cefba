use std::fmt;

#[derive(Debug)]
pub enum CameraError {
    /// The device could not be opened or configured (missing, busy, or
    /// permission denied).
    Device(String),
    /// The capture stream failed after the device was opened.
    Stream(String),
    /// The internal frame channel is closed or unavailable.
    Channel(String),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::Device(msg) => write!(f, "camera device error: {msg}"),
            CameraError::Stream(msg) => write!(f, "camera stream error: {msg}"),
            CameraError::Channel(msg) => write!(f, "camera channel error: {msg}"),
        }
    }
}

impl std::error::Error for CameraError {}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        CameraError::Device(err.to_string())
    }
}
