use crate::{CaptureError, Frame, Recording};
use std::time::Duration;

/// Portion of the clip scanned when duration metadata is unusable.
pub const FALLBACK_WINDOW: Duration = Duration::from_secs(3);

/// JPEG start-of-image marker. Chunks that do not begin with it are treated
/// as undecodable and skipped.
const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

/// Re-extract up to `target` frames from a finished recording.
///
/// With usable duration metadata, picks the chunk nearest each of the
/// evenly spaced timestamps `i * duration / target` for `i in 0..target`.
/// Without it, steps evenly through the chunks that fall inside
/// [`FALLBACK_WINDOW`]. Either way the result may hold fewer than `target`
/// frames; returned frames are re-indexed from 1 in clip order.
///
/// # Errors
///
/// Returns `CaptureError::Extract` if the recording is empty or no chunk
/// decodes as JPEG.
pub fn extract_frames(recording: &Recording, target: usize) -> Result<Vec<Frame>, CaptureError> {
    if recording.is_empty() {
        return Err(CaptureError::Extract("recording is empty".to_string()));
    }
    if target == 0 {
        return Ok(Vec::new());
    }

    let chunk_indices = match recording.duration() {
        Some(duration) if !duration.is_zero() => seek_indices(recording, duration, target),
        _ => {
            log::debug!("duration metadata unusable, stepping over fallback window");
            window_indices(recording, target)
        }
    };

    let mut frames = Vec::with_capacity(chunk_indices.len());
    for chunk_index in chunk_indices {
        let chunk = &recording.chunks()[chunk_index];
        if !chunk.data.starts_with(&JPEG_SOI) {
            log::warn!("skipping undecodable chunk at {:?}", chunk.offset);
            continue;
        }
        let index = frames.len() as u32 + 1;
        frames.push(Frame::new(index, chunk.offset, chunk.data.clone()));
    }

    if frames.is_empty() {
        return Err(CaptureError::Extract(
            "no chunk in the recording decoded as an image".to_string(),
        ));
    }
    Ok(frames)
}

/// Chunk indices nearest the evenly spaced seek timestamps.
fn seek_indices(recording: &Recording, duration: Duration, target: usize) -> Vec<usize> {
    let mut indices = Vec::with_capacity(target);

    for i in 0..target {
        let timestamp = duration * i as u32 / target as u32;
        let index = nearest_chunk(recording, timestamp);
        if indices.last() != Some(&index) {
            indices.push(index);
        }
    }

    indices
}

/// Index of the chunk whose offset is closest to `timestamp`.
///
/// Chunks are appended in offset order, so a binary search bounds the two
/// candidates.
fn nearest_chunk(recording: &Recording, timestamp: Duration) -> usize {
    let chunks = recording.chunks();
    let right = chunks.partition_point(|chunk| chunk.offset < timestamp);
    if right == 0 {
        return 0;
    }
    if right == chunks.len() {
        return chunks.len() - 1;
    }

    let before = timestamp - chunks[right - 1].offset;
    let after = chunks[right].offset - timestamp;
    if before <= after { right - 1 } else { right }
}

/// Evenly spaced chunk indices across the fallback window.
fn window_indices(recording: &Recording, target: usize) -> Vec<usize> {
    let chunks = recording.chunks();
    let in_window = chunks.partition_point(|chunk| chunk.offset <= FALLBACK_WINDOW);
    let count = in_window.max(1).min(chunks.len());

    let mut indices = Vec::with_capacity(target.min(count));
    for i in 0..target {
        let index = i * count / target;
        if indices.last() != Some(&index) {
            indices.push(index);
        }
    }
    indices
}
