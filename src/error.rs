use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures of the roast proxy route.
#[derive(Debug, Error)]
pub enum RoastError {
    #[error("No image provided")]
    MissingImage,

    /// The upstream answered with a non-success status. Both status and body
    /// are handed back to the caller untouched.
    #[error("upstream returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    Unexpected(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl RoastError {
    pub fn status(&self) -> StatusCode {
        match self {
            RoastError::MissingImage => StatusCode::BAD_REQUEST,
            RoastError::Upstream { status, .. } => *status,
            RoastError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            RoastError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RoastError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            RoastError::MissingImage => RoastError::MissingImage.to_string(),
            RoastError::Upstream { body, .. } => body,
            RoastError::PayloadTooLarge(message) => message,
            RoastError::Unexpected(message) if message.is_empty() => "Unknown error".to_string(),
            RoastError::Unexpected(message) => message,
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<reqwest::Error> for RoastError {
    fn from(err: reqwest::Error) -> Self {
        RoastError::Unexpected(err.to_string())
    }
}

impl From<MultipartError> for RoastError {
    fn from(err: MultipartError) -> Self {
        match err.status() {
            StatusCode::PAYLOAD_TOO_LARGE => RoastError::PayloadTooLarge(err.body_text()),
            _ => RoastError::Unexpected(err.body_text()),
        }
    }
}

impl From<MultipartRejection> for RoastError {
    fn from(err: MultipartRejection) -> Self {
        RoastError::Unexpected(err.body_text())
    }
}
