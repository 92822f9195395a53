//! Error types for the voice-agent client.

use thiserror::Error;

/// Errors that can occur when talking to the voice provider.
#[derive(Debug, Error)]
pub enum VoiceError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success response from the provider.
    #[error("Provider error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
