//! Capture pipeline for the gaze workspace.
//!
//! Records a short clip from a camera, samples still frames on a fixed
//! cadence while recording, and re-extracts frames from the recorded clip
//! when live sampling under-delivers.

pub mod error;
pub mod extract;
pub mod frame;
pub mod recorder;
pub mod recording;

pub use error::CaptureError;
pub use extract::extract_frames;
pub use frame::Frame;
pub use recorder::{CaptureOutcome, Recorder, RecorderConfig};
pub use recording::{Chunk, Recording};
