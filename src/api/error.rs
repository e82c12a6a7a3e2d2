use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{distribution::DistributionError, generator::GenerateError, warning};

/// JSON error response: `{ "error": "<message>" }` with a status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    /// Logs the upstream cause and answers with a generic message.
    pub fn upstream(message: &str, cause: impl std::fmt::Display) -> Self {
        warning!("{}: {}", message, cause);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<DistributionError> for ApiError {
    fn from(err: DistributionError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl From<GenerateError> for ApiError {
    fn from(err: GenerateError) -> Self {
        match err {
            GenerateError::NoArtists => ApiError::bad_request(err.to_string()),
            GenerateError::Distribution(e) => e.into(),
            GenerateError::Fetch(e) => ApiError::upstream("Failed to fetch artist tracks", e),
            GenerateError::Playlist(e) => {
                ApiError::upstream("Playlist creation or update failed", e)
            }
        }
    }
}
