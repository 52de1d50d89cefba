use crate::{GazeJudgment, ModelError};
use async_trait::async_trait;

/// One image handed to the model, already decoded from its transport URI.
#[derive(Debug, Clone)]
pub struct ImagePart {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Narrow seam to the hosted multimodal model.
///
/// One call per analysis; implementations do not retry. Anything that can
/// answer a prompt plus a labeled image batch with per-frame judgments can
/// stand in for the hosted service, which is how tests avoid it.
#[async_trait]
pub trait GazeModel: Send + Sync {
    /// Submit one prompt plus images in frame order; returns per-frame
    /// judgments or the first error encountered.
    async fn submit(
        &self,
        prompt: &str,
        images: &[ImagePart],
    ) -> Result<Vec<GazeJudgment>, ModelError>;
}
