use crate::CameraError;

/// Async camera trait for still capture.
///
/// Implementations provide a `recv` method that asynchronously returns the
/// next frame as JPEG-encoded bytes.
#[allow(async_fn_in_trait)]
pub trait Camera {
    /// Receive the next JPEG-encoded frame from the camera.
    async fn recv(&mut self) -> Result<Vec<u8>, CameraError>;
}
