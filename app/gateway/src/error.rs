//! HTTP error mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use store::StoreError;

/// An error response carried to the HTTP boundary.
///
/// Store failures map onto status codes here so handlers stay a plain
/// `Result<_, ApiError>` and nothing escapes to the transport layer
/// unhandled.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    /// Create an error with an explicit status and detail message.
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::new(StatusCode::NOT_FOUND, "Asset not found"),
            StoreError::Invalid(detail) => Self::new(StatusCode::UNPROCESSABLE_ENTITY, detail),
            StoreError::Storage(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage failure while accessing assets",
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({"detail": self.detail}));
        (self.status, body).into_response()
    }
}
