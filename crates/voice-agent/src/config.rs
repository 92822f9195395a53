//! Configuration for the Retell client.

use std::env;

use crate::error::VoiceError;

/// Configuration for [`RetellClient`](crate::RetellClient).
#[derive(Debug, Clone)]
pub struct RetellConfig {
    /// Provider API URL.
    pub api_url: String,

    /// API key for bearer authentication.
    pub api_key: String,

    /// Voice used when a scenario does not name one.
    pub default_voice_id: String,
}

impl Default for RetellConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.retellai.com".to_string(),
            api_key: String::new(),
            default_voice_id: "11labs-Adrian".to_string(),
        }
    }
}

impl RetellConfig {
    /// Create configuration from environment variables.
    ///
    /// Required:
    /// - `RETELL_API_KEY` - API key for authentication
    ///
    /// Optional:
    /// - `RETELL_API_URL` - API URL (default: https://api.retellai.com)
    /// - `RETELL_DEFAULT_VOICE_ID` - fallback voice (default: 11labs-Adrian)
    pub fn from_env() -> Result<Self, VoiceError> {
        let api_key = env::var("RETELL_API_KEY")
            .map_err(|_| VoiceError::Config("RETELL_API_KEY not set".to_string()))?;

        let api_url =
            env::var("RETELL_API_URL").unwrap_or_else(|_| "https://api.retellai.com".to_string());

        let default_voice_id = env::var("RETELL_DEFAULT_VOICE_ID")
            .unwrap_or_else(|_| "11labs-Adrian".to_string());

        Ok(Self {
            api_url,
            api_key,
            default_voice_id,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> RetellConfigBuilder {
        RetellConfigBuilder::default()
    }
}

/// Builder for [`RetellConfig`].
#[derive(Debug, Default)]
pub struct RetellConfigBuilder {
    config: RetellConfig,
}

impl RetellConfigBuilder {
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

    /// Set the default voice.
    pub fn default_voice_id(mut self, voice_id: impl Into<String>) -> Self {
        self.config.default_voice_id = voice_id.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> RetellConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RetellConfig::default();
        assert_eq!(config.api_url, "https://api.retellai.com");
        assert!(config.api_key.is_empty());
        assert_eq!(config.default_voice_id, "11labs-Adrian");
    }

    #[test]
    fn test_builder() {
        let config = RetellConfig::builder()
            .api_key("key-123")
            .api_url("https://voice.test")
            .default_voice_id("11labs-Kate")
            .build();

        assert_eq!(config.api_key, "key-123");
        assert_eq!(config.api_url, "https://voice.test");
        assert_eq!(config.default_voice_id, "11labs-Kate");
    }
}
