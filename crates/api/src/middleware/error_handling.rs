//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error responses, so
//! every endpoint fails the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use studypact_core::errors::StudyError;

/// Application error wrapper that provides HTTP status code mapping.
///
/// Wraps a domain [`StudyError`] and implements `IntoResponse`, which lets
/// handlers return `Result<_, AppError>` and use `?` on anything that
/// converts into a `StudyError`.
#[derive(Debug)]
pub struct AppError(pub StudyError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            StudyError::NotFound(_) => StatusCode::NOT_FOUND,
            StudyError::Validation(_) => StatusCode::BAD_REQUEST,
            StudyError::Authorization(_) => StatusCode::FORBIDDEN,
            StudyError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StudyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

impl From<StudyError> for AppError {
    fn from(err: StudyError) -> Self {
        AppError(err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(StudyError::Database(err))
    }
}

/// Maps a StudyError directly to an HTTP response.
pub fn map_error(err: StudyError) -> Response {
    AppError(err).into_response()
}
