use crate::{Camera, CameraConfig, CameraError};
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc;
use v4l::buffer::Type;
use v4l::io::mmap::Stream as MmapStream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, Format, FourCC};

type FrameResult = Result<Vec<u8>, CameraError>;

/// V4L2 camera implementation capturing MJPEG stills.
///
/// The device is asked for MJPEG so frames arrive already encoded; no
/// decode or re-encode happens on the capture path. Dropping the camera
/// stops the capture thread and releases the device.
pub struct V4l2Camera {
    config: CameraConfig,
    device: Option<Device>,
    receiver: Option<mpsc::Receiver<FrameResult>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for V4l2Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Camera")
            .field("config", &self.config)
            .field("device", &"<v4l::Device>")
            .field("receiver", &self.receiver.is_some())
            .field("thread_handle", &self.thread_handle.is_some())
            .finish()
    }
}

impl Camera for V4l2Camera {
    async fn recv(&mut self) -> Result<Vec<u8>, CameraError> {
        self.ensure_started()?;

        let receiver = self
            .receiver
            .as_mut()
            .ok_or_else(|| CameraError::Channel("Receiver not initialized".to_string()))?;

        receiver
            .recv()
            .await
            .ok_or_else(|| CameraError::Channel("Channel closed".to_string()))?
    }
}

impl Drop for V4l2Camera {
    fn drop(&mut self) {
        // Drop the receiver to signal the thread to stop
        drop(self.receiver.take());

        // Wait for the thread to finish so the device is released
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl V4l2Camera {
    /// Create a new V4L2 camera with the given configuration.
    ///
    /// Opens the device at `config.device()`, sets MJPEG format at the
    /// suggested resolution, and configures the frame rate.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::Device` if:
    /// - The device cannot be opened (missing or permission denied)
    /// - MJPEG format is not supported
    /// - Format or parameter setting fails
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        let device = Device::with_path(config.device())?;

        // Ask for MJPEG at the suggested resolution
        let format = Format::new(config.width(), config.height(), FourCC::new(b"MJPG"));
        let actual = Capture::set_format(&device, &format)?;

        // The device may silently switch to another format it prefers
        if actual.fourcc != FourCC::new(b"MJPG") {
            return Err(CameraError::Device(
                "MJPEG format not supported by device".to_string(),
            ));
        }

        let params = v4l::video::capture::Parameters::with_fps(config.fps());
        Capture::set_params(&device, &params)?;

        log::debug!(
            "opened {} at {}x{} MJPEG",
            config.device(),
            actual.width,
            actual.height
        );

        Ok(Self {
            config,
            device: Some(device),
            receiver: None,
            thread_handle: None,
        })
    }

    /// Start the capture thread if not already running.
    ///
    /// Called automatically on the first `recv()`.
    fn ensure_started(&mut self) -> Result<(), CameraError> {
        if self.receiver.is_some() {
            return Ok(());
        }

        let device = self
            .device
            .take()
            .ok_or_else(|| CameraError::Device("Device already consumed".to_string()))?;

        let buffer_count = self.config.buffer_count();
        let (tx, rx) = mpsc::channel(buffer_count as usize);

        let handle = thread::spawn(move || {
            capture_loop(device, tx, buffer_count);
        });

        self.receiver = Some(rx);
        self.thread_handle = Some(handle);

        Ok(())
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }
}

/// Background thread capture loop.
///
/// Reads MJPEG buffers from V4L2 and sends them through the channel as-is.
/// The first stream error is forwarded through the channel, then the loop
/// exits.
fn capture_loop(device: Device, tx: mpsc::Sender<FrameResult>, buffer_count: u32) {
    let mut stream = match MmapStream::with_buffers(&device, Type::VideoCapture, buffer_count) {
        Ok(stream) => stream,
        Err(e) => {
            let _ = tx.blocking_send(Err(CameraError::Stream(e.to_string())));
            return;
        }
    };

    loop {
        let frame = match CaptureStream::next(&mut stream) {
            // The buffer is only valid until the next call; copy it out
            Ok((data, _metadata)) => Ok(data.to_vec()),
            Err(e) => Err(CameraError::Stream(e.to_string())),
        };

        let failed = frame.is_err();
        if tx.blocking_send(frame).is_err() {
            // Receiver dropped - exit thread
            break;
        }
        if failed {
            break;
        }
    }
}
