use thiserror::Error;

/// Failures at the data-service boundary. None of these are retried; callers
/// log them and fall back to an empty view.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Data service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Unexpected data shape: {0}")]
    Decode(String),
    #[error("Not found: {0}")]
    NotFound(String),
}
