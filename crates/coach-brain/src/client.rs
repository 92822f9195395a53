//! CoachBrain implementation using the Anthropic Messages API.

use std::str::FromStr;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use trainer_core::prompt::{
    build_coaching_prompt, build_intelligence_prompt, build_sentiment_prompt, AnalysisContext,
    PromptPair,
};

use crate::api_types::{ApiError, Message, MessagesRequest, MessagesResponse};
use crate::config::CoachBrainConfig;
use crate::error::BrainError;
use crate::extract::extract_structured;

/// Anthropic API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// The analysis modes the brain can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    /// Score a finished training call into a coaching scorecard.
    Coaching,
    /// Mine structured company facts from unstructured text.
    Extract,
    /// Classify the sentiment of a short text.
    Sentiment,
}

impl FromStr for AnalysisKind {
    type Err = BrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coaching" => Ok(Self::Coaching),
            "extract" => Ok(Self::Extract),
            "sentiment" => Ok(Self::Sentiment),
            other => Err(BrainError::UnknownAnalysis(other.to_string())),
        }
    }
}

/// The outcome of an analysis request.
///
/// Malformed model output degrades to [`Analysis::Unparsed`] instead of an
/// error, so callers can show the raw text rather than crash.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Analysis {
    /// The model's reply parsed to JSON; passed through as-is.
    Parsed(Value),
    /// The reply could not be parsed; wire form `{"raw": ..., "parseError": true}`.
    Unparsed {
        raw: String,
        #[serde(rename = "parseError")]
        parse_error: bool,
    },
}

impl Analysis {
    fn unparsed(raw: impl Into<String>) -> Self {
        Self::Unparsed {
            raw: raw.into(),
            parse_error: true,
        }
    }

    /// The parsed value, if parsing succeeded.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Parsed(value) => Some(value),
            Self::Unparsed { .. } => None,
        }
    }
}

/// Transcript analyzer backed by the Anthropic Messages API.
pub struct CoachBrain {
    client: Client,
    config: CoachBrainConfig,
}

impl CoachBrain {
    /// Create a new brain with the given configuration.
    pub fn new(config: CoachBrainConfig) -> Result<Self, BrainError> {
        if config.api_key.is_empty() {
            return Err(BrainError::Config("api_key is empty".to_string()));
        }

        let client = Client::builder()
            .build()
            .map_err(BrainError::Http)?;

        Ok(Self { client, config })
    }

    /// Create a brain from environment variables.
    ///
    /// See [`CoachBrainConfig::from_env`] for the variables.
    pub fn from_env() -> Result<Self, BrainError> {
        Self::new(CoachBrainConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &CoachBrainConfig {
        &self.config
    }

    /// Run one analysis over the input text.
    ///
    /// `input` is the transcript (coaching), scraped/pasted text (extract),
    /// or the text to classify (sentiment). `context` is only consulted for
    /// coaching.
    pub async fn analyze(
        &self,
        kind: AnalysisKind,
        input: &str,
        context: &AnalysisContext,
    ) -> Result<Analysis, BrainError> {
        let pair = match kind {
            AnalysisKind::Coaching => build_coaching_prompt(input, context),
            AnalysisKind::Extract => build_intelligence_prompt(input),
            AnalysisKind::Sentiment => build_sentiment_prompt(input),
        };

        let reply = self.complete(&pair).await?;

        match extract_structured(&reply) {
            Some(value) => Ok(Analysis::Parsed(value)),
            None => {
                warn!(kind = ?kind, "Model reply did not parse as JSON, returning raw");
                Ok(Analysis::unparsed(reply))
            }
        }
    }

    /// Send one prompt pair to the Messages API and return the reply text.
    async fn complete(&self, pair: &PromptPair) -> Result<String, BrainError> {
        let url = format!("{}/v1/messages", self.config.api_url);

        let request = MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            system: Some(pair.system.clone()),
            messages: vec![Message::user(pair.user.clone())],
        };

        debug!(model = %request.model, "Sending analysis request");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Try to parse as a structured API error
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(BrainError::Api {
                    status: status.as_u16(),
                    message: api_error.error.message,
                });
            }

            return Err(BrainError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let completion: MessagesResponse = response.json().await?;

        if let Some(usage) = &completion.usage {
            debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "Analysis token usage"
            );
        }

        completion
            .text()
            .map(|text| text.to_string())
            .ok_or(BrainError::EmptyResponse)
    }
}
