use serde::{Deserialize, Serialize};

/// One per-frame judgment returned by the model.
///
/// `frame` is the 1-indexed position of the frame in the submitted batch.
/// `eyes_closed` is optional on the wire and defaults to false, so payloads
/// from models that never report it still parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GazeJudgment {
    pub frame: u32,
    /// True when the gaze is directed at the camera/screen.
    pub gaze: bool,
    #[serde(default, rename = "eyesClosed")]
    pub eyes_closed: bool,
    /// Model confidence for this judgment, 0-100.
    pub confidence: f32,
}

/// On-screen / off-screen tallies over a judgment list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub on_screen: usize,
    pub off_screen: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.on_screen + self.off_screen
    }
}

/// Tally on-screen and off-screen judgments.
pub fn summarize(judgments: &[GazeJudgment]) -> Summary {
    let mut summary = Summary::default();
    for judgment in judgments {
        if judgment.gaze {
            summary.on_screen += 1;
        } else {
            summary.off_screen += 1;
        }
    }
    summary
}
