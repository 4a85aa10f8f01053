//! Server error type and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use pagehits_core::PageHitsError;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Page(#[from] PageHitsError),

    #[error("not found")]
    RouteNotFound,

    #[error("invalid config: {0}")]
    Config(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn client_code(&self) -> &'static str {
        match self {
            ApiError::Page(e) => e.client_code().as_str(),
            ApiError::RouteNotFound => "NOT_FOUND",
            ApiError::Config(_) => "INVALID_CONFIG",
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Page(PageHitsError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Page(PageHitsError::NotFound(_)) | ApiError::RouteNotFound => {
                StatusCode::NOT_FOUND
            }
            ApiError::Config(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            tracing::debug!(code = self.client_code(), error = %self, "request rejected");
            self.to_string()
        };

        let body = Json(json!({
            "error": message,
            "code": self.client_code(),
        }));
        (status, body).into_response()
    }
}
