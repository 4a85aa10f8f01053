//! Registry error type.

use thiserror::Error;

use crate::page::PageId;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Missing or malformed input.
    Validation,
    /// Unknown page identifier.
    NotFound,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::Validation => "VALIDATION_ERROR",
            ClientCode::NotFound => "NOT_FOUND",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PageHitsError>;

/// Every failure the registry can report. Neither kind is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageHitsError {
    #[error("{0}")]
    Validation(String),
    #[error("page not found")]
    NotFound(PageId),
}

impl PageHitsError {
    /// Map to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            PageHitsError::Validation(_) => ClientCode::Validation,
            PageHitsError::NotFound(_) => ClientCode::NotFound,
        }
    }
}
