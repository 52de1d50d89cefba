use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use gaze_model::{GazeModel, HostedModel, HostedModelConfig, ImagePart, ModelError};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
struct StubState {
    // Response the stub answers with
    reply: Arc<(StatusCode, Value)>,
    // Last request body the stub saw
    seen: Arc<Mutex<Option<Value>>>,
}

async fn generate(State(state): State<StubState>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    *state.seen.lock().unwrap() = Some(body);
    (state.reply.0, Json(state.reply.1.clone()))
}

/// Bind a stub generateContent endpoint and return its base URL plus the
/// captured-request slot.
async fn spawn_stub(status: StatusCode, reply: Value) -> (String, Arc<Mutex<Option<Value>>>) {
    let seen = Arc::new(Mutex::new(None));
    let state = StubState {
        reply: Arc::new((status, reply)),
        seen: seen.clone(),
    };
    let app = Router::new()
        .route("/v1beta/models/{model}", post(generate))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr: SocketAddr = listener.local_addr().expect("local_addr failed");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub serve failed");
    });

    (format!("http://{addr}"), seen)
}

fn model_for(base_url: String) -> HostedModel {
    let config = HostedModelConfig::default()
        .with_base_url(base_url)
        .with_api_key("test-key".to_string())
        .with_timeout(Duration::from_secs(5));
    HostedModel::new(config).expect("client build failed")
}

fn candidate_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] }
        }]
    })
}

fn images(count: usize) -> Vec<ImagePart> {
    (0..count)
        .map(|_| ImagePart {
            mime_type: "image/jpeg".to_string(),
            data: vec![0xFF, 0xD8, 0xFF, 0xD9],
        })
        .collect()
}

#[test]
fn test_missing_key_rejected_up_front() {
    let config = HostedModelConfig::default();
    match HostedModel::new(config) {
        Err(ModelError::MissingKey) => {}
        other => panic!("Expected ModelError::MissingKey, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_submit_parses_judgments() {
    let text = r#"[{"frame":1,"gaze":true,"confidence":91},{"frame":2,"gaze":false,"eyesClosed":true,"confidence":66}]"#;
    let (base_url, _) = spawn_stub(StatusCode::OK, candidate_reply(text)).await;

    let model = model_for(base_url);
    let judgments = model
        .submit("judge these", &images(2))
        .await
        .expect("submit failed");

    assert_eq!(judgments.len(), 2);
    assert_eq!(judgments[0].frame, 1);
    assert!(judgments[0].gaze);
    assert!(!judgments[0].eyes_closed);
    assert!(judgments[1].eyes_closed);
}

#[tokio::test]
async fn test_request_carries_schema_prompt_and_images() {
    let text = r#"[{"frame":1,"gaze":true,"confidence":80}]"#;
    let (base_url, seen) = spawn_stub(StatusCode::OK, candidate_reply(text)).await;

    let model = model_for(base_url);
    model
        .submit("look at the lens", &images(2))
        .await
        .expect("submit failed");

    let body = seen.lock().unwrap().clone().expect("stub saw no request");

    // Prompt text leads the user parts
    assert_eq!(
        body.pointer("/contents/0/parts/0/text").and_then(Value::as_str),
        Some("look at the lens")
    );
    // Each image is preceded by its 1-indexed label
    assert_eq!(
        body.pointer("/contents/0/parts/1/text").and_then(Value::as_str),
        Some("Frame 1")
    );
    assert!(body.pointer("/contents/0/parts/2/inline_data/data").is_some());
    assert_eq!(
        body.pointer("/contents/0/parts/3/text").and_then(Value::as_str),
        Some("Frame 2")
    );
    // Structured output is requested with the judgment schema
    assert_eq!(
        body.pointer("/generationConfig/response_mime_type")
            .and_then(Value::as_str),
        Some("application/json")
    );
    assert_eq!(
        body.pointer("/generationConfig/response_schema/type")
            .and_then(Value::as_str),
        Some("ARRAY")
    );
    // A system instruction rides along
    assert!(body.pointer("/system_instruction/parts/0/text").is_some());
}

#[tokio::test]
async fn test_api_error_surfaces_status_and_message() {
    let reply = json!({ "error": { "message": "quota exhausted" } });
    let (base_url, _) = spawn_stub(StatusCode::TOO_MANY_REQUESTS, reply).await;

    let model = model_for(base_url);
    match model.submit("judge", &images(1)).await {
        Err(ModelError::Api { status, message }) => {
            assert_eq!(status, 429);
            assert!(message.contains("quota exhausted"));
        }
        other => panic!("Expected ModelError::Api, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_missing_candidates_is_malformed() {
    let (base_url, _) = spawn_stub(StatusCode::OK, json!({ "candidates": [] })).await;

    let model = model_for(base_url);
    match model.submit("judge", &images(1)).await {
        Err(ModelError::Malformed(_)) => {}
        other => panic!("Expected ModelError::Malformed, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_non_list_candidate_text_is_malformed() {
    let (base_url, _) = spawn_stub(StatusCode::OK, candidate_reply("the subject looks away")).await;

    let model = model_for(base_url);
    match model.submit("judge", &images(1)).await {
        Err(ModelError::Malformed(_)) => {}
        other => panic!("Expected ModelError::Malformed, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    // Port 1 on localhost refuses connections
    let model = model_for("http://127.0.0.1:1".to_string());

    match model.submit("judge", &images(1)).await {
        Err(ModelError::Transport(_)) => {}
        other => panic!("Expected ModelError::Transport, got {:?}", other.map(|_| ())),
    }
}
