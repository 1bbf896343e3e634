// errors.rs
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, bad parameters) or the spreadsheet export.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Spreadsheet Error: {0}")]
    XlsxError(String),
    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    /// Whether the failure is ours rather than the client's.
    pub fn is_server_side(&self) -> bool {
        matches!(self, ServerError::XlsxError(_) | ServerError::InternalError)
    }
}
