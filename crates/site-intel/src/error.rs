//! Error types for website scraping.

use thiserror::Error;

/// Errors that can fail a scrape.
///
/// Only the primary page is load-bearing; sub-page enrichment failures are
/// swallowed by the scraper and never surface here.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The URL could not be parsed even after normalization.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The primary page answered with a non-success status.
    #[error("Fetch failed ({status}) for {url}")]
    Fetch { status: u16, url: String },
}
