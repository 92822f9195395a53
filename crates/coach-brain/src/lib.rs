//! Anthropic-backed transcript analysis.
//!
//! [`CoachBrain`] sends a `{system, user}` prompt pair to the Anthropic
//! Messages API and parses the reply through a structured-response extractor
//! with an explicit fallback chain (fenced ```json block, any fenced block,
//! first brace span, whole text). A reply that still fails to parse is
//! returned as [`Analysis::Unparsed`] rather than an error: malformed model
//! output must degrade, not crash, the caller.
//!
//! Three analysis modes exist, dispatched by [`AnalysisKind`]:
//!
//! - `Coaching` - score a finished training call into a scorecard
//! - `Extract` - mine structured company facts from unstructured text
//! - `Sentiment` - classify the sentiment of a short text

mod api_types;
mod client;
mod config;
mod error;
mod extract;

pub use client::{Analysis, AnalysisKind, CoachBrain};
pub use config::CoachBrainConfig;
pub use error::BrainError;
pub use extract::extract_structured;
