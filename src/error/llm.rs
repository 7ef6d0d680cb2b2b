use axum::http::StatusCode;
use thiserror::Error as ThisError;

/// Failures of a completion call against the upstream LLM API.
#[derive(Debug, ThisError)]
pub enum LlmError {
    #[error("no default API provider and no fallback `llm.{0}` configured")]
    NotConfigured(&'static str),

    #[error("upstream returned status {status}: {body:.200}")]
    UpstreamStatus { status: StatusCode, body: String },

    #[error("unexpected completion response: {0}")]
    MalformedResponse(String),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("invalid provider URL: {0}")]
    Url(#[from] url::ParseError),
}
