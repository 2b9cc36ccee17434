use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::error::ReviewError;
use crate::upstream::transport::Transport;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-05-20";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Name of the environment variable the CLI reads the credential from.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Model endpoint configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Text-generation client for the Gemini `generateContent` API.
pub struct GeminiClient<T> {
    config: GeminiConfig,
    transport: T,
}

impl<T: Transport> GeminiClient<T> {
    pub fn new(config: GeminiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Send one prompt and return the model's literal reply text.
    ///
    /// The credential is checked before the transport is touched.
    pub fn generate(&self, prompt: &str) -> Result<String, ReviewError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                ReviewError::MissingConfiguration(format!(
                    "no API key; set {API_KEY_ENV} or pass --api-key"
                ))
            })?;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model,
            api_key
        );
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });

        info!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "requesting review from model"
        );

        let reply = self.transport.post_json(&url, &body)?;

        if !reply.is_success() {
            warn!(status = reply.status, "model endpoint returned an error");
            return Err(ReviewError::UpstreamError {
                status: reply.status,
                body: reply.body,
            });
        }

        let text = reply_text(&reply.body).ok_or(ReviewError::EmptyResponse)?;
        debug!(reply_len = text.len(), "received model reply");

        Ok(text)
    }
}

/// `candidates[0].content.parts[0].text`, if present and non-empty.
fn reply_text(envelope: &str) -> Option<String> {
    let value: Value = match serde_json::from_str(envelope) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "model envelope is not JSON");
            return None;
        }
    };

    value
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
