use std::sync::Arc;
use std::time::Duration;

/// One timestamped chunk of the fallback clip.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Offset from recording start.
    pub offset: Duration,
    /// JPEG-encoded image bytes.
    pub data: Arc<Vec<u8>>,
}

impl Chunk {
    pub fn new(offset: Duration, data: Arc<Vec<u8>>) -> Self {
        Self { offset, data }
    }
}

/// The in-memory fallback clip: ordered JPEG chunks plus duration metadata.
///
/// Duration metadata is only present once the recording has been finalized;
/// extraction treats an absent or zero duration as unusable and falls back
/// to positional stepping through the chunk sequence.
#[derive(Debug, Clone, Default)]
pub struct Recording {
    chunks: Vec<Chunk>,
    duration: Option<Duration>,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a recording from raw chunks, e.g. in tests or when loading
    /// a clip whose duration metadata was lost.
    pub fn from_chunks(chunks: Vec<Chunk>, duration: Option<Duration>) -> Self {
        Self { chunks, duration }
    }

    /// Append a chunk. Chunks are expected in offset order.
    pub fn push(&mut self, chunk: Chunk) {
        self.chunks.push(chunk);
    }

    /// Record the total clip duration once recording has stopped.
    pub fn finalize(&mut self, duration: Duration) {
        self.duration = Some(duration);
    }

    /// Total clip duration, if known and usable.
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Discard all chunks and the duration metadata.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.duration = None;
    }
}
