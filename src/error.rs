use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T, E = TranslateError> = std::result::Result<T, E>;

/// Failure of one translation call. Every variant is per-call; nothing here is
/// fatal to the process.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The configured host or endpoint does not form a valid URL.
    #[error("build request: invalid endpoint {endpoint:?}: {source}")]
    ParamBuild {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    /// A single attempt failed below HTTP (connect, TLS, timeout, body read).
    #[error("fetch: transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// A single attempt got a response other than 200.
    #[error("fetch: unexpected status {0}")]
    Status(StatusCode),

    /// Every attempt failed; `last` is the final attempt's failure.
    #[error("fetch: request exhausted after {attempts} attempt(s), last failure: {last}")]
    RequestExhausted {
        attempts: u32,
        #[source]
        last: Box<TranslateError>,
    },

    #[error("fetch: cancelled")]
    Cancelled,

    #[error("decode: {0}")]
    Decode(#[from] DecodeError),
}

impl TranslateError {
    /// Whether the fetch loop should try again after this failure.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status(_))
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    Shape(String),
}
