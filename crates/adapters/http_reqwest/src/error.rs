//! HTTP-specific error type wrapping reqwest and serde errors.

use aini_domain::error::FetchError;

/// Errors originating from the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The client could not be constructed (TLS backend, invalid settings).
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),

    /// The request could not be sent or the body could not be read.
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    /// The body was not the expected JSON document.
    #[error("{0}")]
    Decode(#[source] serde_json::Error),

    /// The server answered with a non-2xx status.
    #[error("{}", status_message(.status, .detail))]
    Status { status: u16, detail: Option<String> },
}

#[allow(clippy::trivially_copy_pass_by_ref, clippy::ref_option)]
fn status_message(status: &u16, detail: &Option<String>) -> String {
    detail.clone().unwrap_or_else(|| format!("HTTP {status}"))
}

impl From<HttpError> for FetchError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Build(_) | HttpError::Transport(_) => Self::Transport(err.to_string()),
            HttpError::Decode(_) => Self::Decode(err.to_string()),
            HttpError::Status { .. } => Self::Application(err.to_string()),
        }
    }
}
