use gaze_capture::{Frame, Recording};
use gaze_model::GazeJudgment;

/// Per-attempt client state: sampled frames, the fallback clip, and the
/// judgments from the last analysis.
#[derive(Debug, Default)]
pub struct Session {
    pub frames: Vec<Frame>,
    pub recording: Recording,
    pub results: Vec<GazeJudgment>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard everything from the previous attempt, returning to the
    /// capture-ready state.
    pub fn reset(&mut self) {
        self.frames.clear();
        self.recording.clear();
        self.results.clear();
    }
}
