//! Configuration for the analysis brain.

use std::env;

use crate::error::BrainError;

/// Configuration for [`CoachBrain`](crate::CoachBrain).
#[derive(Debug, Clone)]
pub struct CoachBrainConfig {
    /// Anthropic API URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Maximum tokens for the analysis reply.
    pub max_tokens: u32,
}

impl Default for CoachBrainConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.anthropic.com".to_string(),
            api_key: String::new(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            max_tokens: 2048,
        }
    }
}

impl CoachBrainConfig {
    /// Create configuration from environment variables.
    ///
    /// Required:
    /// - `ANTHROPIC_API_KEY` - API key for authentication
    ///
    /// Optional:
    /// - `ANTHROPIC_API_URL` - API URL (default: https://api.anthropic.com)
    /// - `ANTHROPIC_MODEL` - Model name (default: claude-3-5-sonnet-20241022)
    /// - `ANTHROPIC_MAX_TOKENS` - Max tokens (default: 2048)
    pub fn from_env() -> Result<Self, BrainError> {
        let api_key = env::var("ANTHROPIC_API_KEY")
            .map_err(|_| BrainError::Config("ANTHROPIC_API_KEY not set".to_string()))?;

        let api_url = env::var("ANTHROPIC_API_URL")
            .unwrap_or_else(|_| "https://api.anthropic.com".to_string());

        let model = env::var("ANTHROPIC_MODEL")
            .unwrap_or_else(|_| "claude-3-5-sonnet-20241022".to_string());

        let max_tokens = env::var("ANTHROPIC_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2048);

        Ok(Self {
            api_url,
            api_key,
            model,
            max_tokens,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> CoachBrainConfigBuilder {
        CoachBrainConfigBuilder::default()
    }
}

/// Builder for [`CoachBrainConfig`].
#[derive(Debug, Default)]
pub struct CoachBrainConfigBuilder {
    config: CoachBrainConfig,
}

impl CoachBrainConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = tokens;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> CoachBrainConfig {
        self.config
    }
}
