use std::sync::Arc;
use std::time::Duration;

/// A sampled still frame.
///
/// `index` is the 1-based position of the frame in the capture sequence;
/// `offset` is its distance from recording start. The JPEG bytes are shared
/// with the recording, so cloning a frame is cheap.
#[derive(Debug, Clone)]
pub struct Frame {
    pub index: u32,
    pub offset: Duration,
    pub jpeg: Arc<Vec<u8>>,
}

impl Frame {
    pub fn new(index: u32, offset: Duration, jpeg: Arc<Vec<u8>>) -> Self {
        Self {
            index,
            offset,
            jpeg,
        }
    }

    /// Render the frame as a `data:image/jpeg;base64,` URI for transport.
    pub fn to_data_uri(&self) -> String {
        gaze_base::data_uri::encode_jpeg(&self.jpeg)
    }
}
