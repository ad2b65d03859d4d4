use thiserror::Error;

/// Top-level error type for the `nexecur-api` crate.
///
/// Only transport-level failures live here. The vendor reports business
/// failures in-band (`message` / `status` fields), so deciding whether a
/// parsed response is a success belongs to `nexecur-core`.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Header value rejected by the HTTP stack (e.g. control characters in a token).
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Non-2xx response whose body was not JSON.
    #[error("Unexpected HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// Request body could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
