//! Error types for the training server.
//!
//! Status mapping follows the error taxonomy: validation failures are 400,
//! unknown IDs are 404, everything that blocks the request's purpose
//! (provider outages, storage failures) is 500. Every body is shaped
//! `{"error": message}`; outside production a `stack` field carries the
//! debug form of the underlying error.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::config::is_production;

/// Errors that can occur while serving a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Persistence error (carries its own validation/not-found split).
    #[error("{0}")]
    Datastore(#[from] datastore::DatastoreError),

    /// Voice provider error.
    #[error("Voice provider error: {0}")]
    Voice(#[from] voice_agent::VoiceError),

    /// Analysis provider error.
    #[error("Analysis error: {0}")]
    Brain(#[from] coach_brain::BrainError),

    /// Website scrape error.
    #[error("Scrape error: {0}")]
    Scrape(#[from] site_intel::ScrapeError),

    /// Missing or malformed request fields.
    #[error("{0}")]
    Validation(String),

    /// Unknown resource.
    #[error("{0} not found")]
    NotFound(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Datastore(datastore::DatastoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Datastore(datastore::DatastoreError::Validation(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Datastore(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Brain(coach_brain::BrainError::UnknownAnalysis(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Voice(_) | ApiError::Brain(_) | ApiError::Scrape(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %message, "Request failed");
        } else {
            tracing::debug!(error = %message, status = status.as_u16(), "Request rejected");
        }

        let mut body = serde_json::json!({ "error": message });
        if !is_production() {
            body["stack"] = serde_json::Value::String(format!("{self:?}"));
        }

        (status, Json(body)).into_response()
    }
}

/// Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use datastore::DatastoreError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Datastore(DatastoreError::NotFound("scenario x".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Datastore(DatastoreError::Validation("name required".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Validation("callId is required".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("call abc".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Brain(coach_brain::BrainError::UnknownAnalysis("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Brain(coach_brain::BrainError::EmptyResponse).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
