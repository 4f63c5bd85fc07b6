// crates/streamcut-api/src/error.rs

use thiserror::Error;

/// Errors at the HTTP client boundary. Everything user-facing is rendered
/// through Display — the banners show these strings verbatim.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a non-success status.
    #[error("service returned HTTP {0}")]
    Status(u16),

    /// Connection, TLS, or protocol failure before a status arrived.
    #[error("request failed: {0}")]
    Transport(ureq::Error),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("poster decode: {0}")]
    Poster(#[from] png::DecodingError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ureq::Error> for ApiError {
    fn from(e: ureq::Error) -> Self {
        // ureq reports non-2xx as an error variant; split it out so the
        // banner can say "HTTP 422" instead of a transport-sounding message.
        match e {
            ureq::Error::StatusCode(code) => ApiError::Status(code),
            other => ApiError::Transport(other),
        }
    }
}
