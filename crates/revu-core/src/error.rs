use thiserror::Error;

/// Failure kinds of a single review request.
///
/// Callers branch on the variant; each maps to a distinct process exit code
/// through [`ReviewError::exit_code`].
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("no source code to review")]
    EmptySource,

    #[error("missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("upstream error {status}: {body}")]
    UpstreamError { status: u16, body: String },

    #[error("model returned no content")]
    EmptyResponse,

    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

impl ReviewError {
    /// Process exit code for this failure kind.
    ///
    /// 1 is left for I/O and other failures outside the review pipeline.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReviewError::EmptySource => 2,
            ReviewError::MissingConfiguration(_) => 3,
            ReviewError::Transport(_) => 4,
            ReviewError::UpstreamError { .. } => 5,
            ReviewError::EmptyResponse => 6,
            ReviewError::MalformedResponse(_) => 7,
        }
    }
}
