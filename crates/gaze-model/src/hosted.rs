use crate::{GazeJudgment, GazeModel, ImagePart, ModelError, prompt};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde_json::{Value, json};
use std::time::Duration;

/// Configuration for the hosted structured-generation endpoint.
#[derive(Clone, Debug)]
pub struct HostedModelConfig {
    base_url: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl Default for HostedModelConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.0-flash".to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl HostedModelConfig {
    /// Set the service base URL (tests point this at a local stub).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = api_key;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    // Getters
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Client for a Gemini-style `generateContent` endpoint.
///
/// Every call carries the system instruction, the composed prompt with
/// labeled inline images, and a response schema pinning the output to the
/// judgment list. One request per `submit`, no retries.
#[derive(Clone)]
pub struct HostedModel {
    config: HostedModelConfig,
    http: reqwest::Client,
}

impl HostedModel {
    /// Create a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::MissingKey` when no API key is configured and
    /// `ModelError::Transport` if the HTTP client cannot be built.
    pub fn new(config: HostedModelConfig) -> Result<Self, ModelError> {
        if config.api_key().is_empty() {
            return Err(ModelError::MissingKey);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &HostedModelConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url(),
            self.config.model(),
            self.config.api_key()
        )
    }

    fn request_body(&self, prompt_text: &str, images: &[ImagePart]) -> Value {
        let mut parts = vec![json!({ "text": prompt_text })];
        for (i, image) in images.iter().enumerate() {
            parts.push(json!({ "text": prompt::frame_label(i + 1) }));
            parts.push(json!({
                "inline_data": {
                    "mime_type": image.mime_type,
                    "data": BASE64.encode(&image.data),
                }
            }));
        }

        json!({
            "system_instruction": { "parts": [{ "text": prompt::SYSTEM_INSTRUCTION }] },
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": {
                "response_mime_type": "application/json",
                "response_schema": response_schema(),
            },
        })
    }
}

#[async_trait]
impl GazeModel for HostedModel {
    async fn submit(
        &self,
        prompt: &str,
        images: &[ImagePart],
    ) -> Result<Vec<GazeJudgment>, ModelError> {
        log::debug!(
            "submitting {} frames to {}",
            images.len(),
            self.config.model()
        );

        let response = self
            .http
            .post(self.endpoint())
            .json(&self.request_body(prompt, images))
            .send()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;
        parse_response(&body)
    }
}

/// Schema constraining the model to the canonical judgment list.
fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "frame": { "type": "INTEGER" },
                "gaze": { "type": "BOOLEAN" },
                "eyesClosed": { "type": "BOOLEAN" },
                "confidence": { "type": "NUMBER" },
            },
            "required": ["frame", "gaze", "confidence"],
        },
    })
}

/// Pull the judgment list out of a `generateContent` response.
fn parse_response(body: &Value) -> Result<Vec<GazeJudgment>, ModelError> {
    let text = body
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .ok_or_else(|| ModelError::Malformed("response has no candidate text".to_string()))?;

    serde_json::from_str(text)
        .map_err(|e| ModelError::Malformed(format!("candidate text is not a judgment list: {e}")))
}

/// Best-effort extraction of the service's own error message.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.chars().take(200).collect())
}
