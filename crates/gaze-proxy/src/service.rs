use crate::wire::{AnalyzeRequest, ErrorBody};
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use gaze_base::data_uri;
use gaze_model::{GazeJudgment, GazeModel, ImagePart, prompt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, ToSocketAddrs};
use tokio::task::JoinHandle;

/// Shared service state: the single seam to the model.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn GazeModel>,
}

/// Build the proxy router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Bind a TCP listener and serve the proxy on a background task.
///
/// Returns the bound address (useful with port 0) and the serving task.
pub async fn bind(
    addr: impl ToSocketAddrs,
    state: AppState,
) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    let app = router(state);

    let task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            log::error!("proxy server exited: {e}");
        }
    });

    Ok((local_addr, task))
}

async fn healthz() -> &'static str {
    "ok"
}

/// `POST /api/analyze`: one model call per request.
///
/// Received -> Validated -> Prompting -> ModelCall -> {Succeeded, Failed}.
async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    // An unparsable or mistyped body is a distinct client error from an
    // empty frame list
    let Json(request) = match body {
        Ok(json) => json,
        Err(rejection) => {
            log::debug!("rejected analyze body: {rejection}");
            return client_error("invalid request body");
        }
    };

    if request.frames.is_empty() {
        return client_error("frames must be a non-empty array");
    }

    let mut images = Vec::with_capacity(request.frames.len());
    for (i, frame) in request.frames.iter().enumerate() {
        match data_uri::parse(frame) {
            Ok((mime_type, data)) => images.push(ImagePart { mime_type, data }),
            Err(e) => {
                log::debug!("frame {} rejected: {e}", i + 1);
                return client_error(&format!("frame {} is not a valid image data URI", i + 1));
            }
        }
    }

    let prompt_text = prompt::build_prompt(images.len());
    match state.model.submit(&prompt_text, &images).await {
        Ok(judgments) => {
            let results = normalize(judgments, images.len());
            Json(results).into_response()
        }
        Err(e) => {
            log::error!("model call failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "gaze analysis failed".to_string(),
                }),
            )
                .into_response()
        }
    }
}

fn client_error(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Drop judgments the model invented and keep at most one per frame.
///
/// The result is never longer than the submitted frame list. Short lists
/// pass through: the model may legitimately omit frames.
fn normalize(judgments: Vec<GazeJudgment>, frame_count: usize) -> Vec<GazeJudgment> {
    let mut seen = vec![false; frame_count];
    let mut results = Vec::with_capacity(frame_count.min(judgments.len()));

    for judgment in judgments {
        let index = judgment.frame as usize;
        if index == 0 || index > frame_count {
            log::warn!("dropping judgment for out-of-range frame {}", judgment.frame);
            continue;
        }
        if seen[index - 1] {
            log::warn!("dropping duplicate judgment for frame {}", judgment.frame);
            continue;
        }
        seen[index - 1] = true;
        results.push(judgment);
    }

    if results.len() != frame_count {
        log::warn!(
            "model returned {} judgments for {} frames",
            results.len(),
            frame_count
        );
    }
    results
}

#[cfg(test)]
mod tests {
    use super::normalize;
    use gaze_model::GazeJudgment;

    fn judgment(frame: u32) -> GazeJudgment {
        GazeJudgment {
            frame,
            gaze: true,
            eyes_closed: false,
            confidence: 80.0,
        }
    }

    #[test]
    fn test_normalize_passes_complete_list() {
        let results = normalize(vec![judgment(1), judgment(2), judgment(3)], 3);
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_normalize_drops_out_of_range() {
        let results = normalize(vec![judgment(0), judgment(1), judgment(5)], 2);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].frame, 1);
    }

    #[test]
    fn test_normalize_drops_duplicates() {
        let results = normalize(vec![judgment(1), judgment(1), judgment(2)], 2);
        let frames: Vec<u32> = results.iter().map(|j| j.frame).collect();
        assert_eq!(frames, vec![1, 2]);
    }

    #[test]
    fn test_normalize_never_exceeds_frame_count() {
        let judgments: Vec<GazeJudgment> = (1..=10).map(judgment).collect();
        let results = normalize(judgments, 4);
        assert_eq!(results.len(), 4);
    }

    #[test]
    fn test_normalize_keeps_short_lists() {
        let results = normalize(vec![judgment(2)], 4);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].frame, 2);
    }
}
