use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;

use crate::error::ReviewError;

/// Status and body of one HTTP exchange, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Opaque request/response boundary to the model endpoint.
///
/// Implementations return `Ok` for every completed exchange, including
/// non-2xx statuses. Only failures to complete the exchange are errors.
pub trait Transport {
    fn post_json(&self, url: &str, body: &Value) -> Result<HttpReply, ReviewError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post_json(&self, url: &str, body: &Value) -> Result<HttpReply, ReviewError> {
        (**self).post_json(url, body)
    }
}

/// Blocking `reqwest` transport.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout_secs: u64) -> Result<Self, ReviewError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("revu/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ReviewError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &str, body: &Value) -> Result<HttpReply, ReviewError> {
        let response = self.client.post(url).json(body).send().map_err(|e| {
            // reqwest errors embed the URL, which carries the credential.
            let e = e.without_url();
            if e.is_timeout() {
                ReviewError::Transport(format!("request timed out: {e}"))
            } else {
                ReviewError::Transport(format!("request failed: {e}"))
            }
        })?;

        let status = response.status();
        let text = response.text().map_err(|e| {
            ReviewError::Transport(format!("failed to read response body: {}", e.without_url()))
        })?;

        Ok(HttpReply {
            status: status.as_u16(),
            body: reply_body(status, text),
        })
    }
}

/// An empty body is replaced by the status's reason phrase.
fn reply_body(status: StatusCode, text: String) -> String {
    if text.is_empty() {
        status.canonical_reason().unwrap_or_default().to_string()
    } else {
        text
    }
}
