//! Error types for the image server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Relay Error Enum ==
/// Unified error type for the image server.
#[derive(Error, Debug)]
pub enum RelayError {
    /// No image loaded under the given path
    #[error("No image loaded for path: {0}")]
    NotFound(String),

    /// Operation disabled by policy (whole-image data transfer)
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Invalid request data (bad region, bad axis path, bad unit)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Pixel coordinates outside the image plane
    #[error("Coordinates ({x}, {y}) out of bounds for {width}x{height} image")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// File could not be opened or decoded as an image
    #[error("Decode error: {0}")]
    Decode(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = match &self {
            RelayError::NotFound(_) => StatusCode::NOT_FOUND,
            RelayError::Unsupported(_) => StatusCode::FORBIDDEN,
            RelayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::OutOfBounds { .. } => StatusCode::BAD_REQUEST,
            RelayError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the image server.
pub type Result<T> = std::result::Result<T, RelayError>;
