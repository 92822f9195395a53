//! Error types for the analysis brain.

use thiserror::Error;

/// Errors that can occur during transcript analysis.
#[derive(Debug, Error)]
pub enum BrainError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the model provider.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The model reply carried no text content.
    #[error("Empty response from model")]
    EmptyResponse,

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Request named an analysis mode that does not exist.
    #[error("Unknown analysis type: {0}")]
    UnknownAnalysis(String),
}
