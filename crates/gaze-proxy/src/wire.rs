use serde::{Deserialize, Serialize};

/// Request body for `POST /api/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Data-URI-encoded stills, in capture order.
    pub frames: Vec<String>,
}

/// Error payload for 4xx/5xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
