//! Voice provider HTTP client.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::RetellConfig;
use crate::error::VoiceError;
use crate::transcript::parse_provider_transcript;
use crate::types::{
    CallRecord, CallTranscript, CreateAgentParams, CreateAgentRequest, CreateAgentResponse,
    CreateLlmRequest, CreateLlmResponse, CreateWebCallRequest, CreateWebCallResponse,
    ProvisionedAgent, ResponseEngine, WebCall,
};

/// Fixed agent tuning. These were settled by ear against the provider's
/// playground and apply to every training call.
const AMBIENT_SOUND: &str = "call-center";
const ENABLE_BACKCHANNEL: bool = true;
const BACKCHANNEL_FREQUENCY: f32 = 0.8;
const INTERRUPTION_SENSITIVITY: f32 = 0.7;

/// Transcript polling schedule: the provider finalizes transcripts
/// asynchronously after a call ends.
const POLL_ATTEMPTS: u32 = 6;
const POLL_INITIAL_DELAY: Duration = Duration::from_millis(400);
const POLL_BACKOFF_MULTIPLIER: u32 = 2;

/// Client for the Retell conversational-voice API.
///
/// Per call, the lifecycle is: provision an LLM config + agent, open a web
/// call, later end the call, poll for the finalized transcript, and delete
/// the agent best-effort.
#[derive(Clone)]
pub struct RetellClient {
    http: Client,
    config: RetellConfig,
}

impl RetellClient {
    /// Create a client from configuration.
    pub fn new(config: RetellConfig) -> Result<Self, VoiceError> {
        if config.api_key.is_empty() {
            return Err(VoiceError::Config("api_key is empty".to_string()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(VoiceError::Http)?;

        Ok(Self { http, config })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self, VoiceError> {
        Self::new(RetellConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &RetellConfig {
        &self.config
    }

    /// Provision a remote LLM config and an agent bound to it.
    ///
    /// Provider failures propagate after logging; there is no retry, so a
    /// transient outage surfaces directly to the caller.
    pub async fn create_agent(
        &self,
        params: CreateAgentParams,
    ) -> Result<ProvisionedAgent, VoiceError> {
        let llm: CreateLlmResponse = self
            .post(
                "/create-retell-llm",
                &CreateLlmRequest {
                    general_prompt: params.prompt,
                    begin_message: params.first_message,
                },
            )
            .await?;
        debug!(llm_id = %llm.llm_id, "Provisioned LLM config");

        let voice_id = if params.voice_id.is_empty() {
            self.config.default_voice_id.clone()
        } else {
            params.voice_id
        };

        let agent: CreateAgentResponse = self
            .post(
                "/create-agent",
                &CreateAgentRequest {
                    agent_name: params.name,
                    voice_id,
                    response_engine: ResponseEngine {
                        engine_type: "retell-llm",
                        llm_id: llm.llm_id.clone(),
                    },
                    ambient_sound: AMBIENT_SOUND,
                    enable_backchannel: ENABLE_BACKCHANNEL,
                    backchannel_frequency: BACKCHANNEL_FREQUENCY,
                    interruption_sensitivity: INTERRUPTION_SENSITIVITY,
                },
            )
            .await?;

        info!(agent_id = %agent.agent_id, llm_id = %llm.llm_id, "Provisioned voice agent");
        Ok(ProvisionedAgent {
            agent_id: agent.agent_id,
            llm_id: llm.llm_id,
        })
    }

    /// Open a browser-compatible call session against an agent.
    pub async fn create_web_call(&self, agent_id: &str) -> Result<WebCall, VoiceError> {
        let call: CreateWebCallResponse = self
            .post(
                "/v2/create-web-call",
                &CreateWebCallRequest {
                    agent_id: agent_id.to_string(),
                },
            )
            .await?;

        info!(call_id = %call.call_id, agent_id = %agent_id, "Opened web call");
        Ok(WebCall {
            call_id: call.call_id,
            access_token: call.access_token,
        })
    }

    /// Signal the provider to terminate a call.
    ///
    /// The transcript is finalized asynchronously afterwards; use
    /// [`wait_for_transcript`](Self::wait_for_transcript) to retrieve it.
    pub async fn end_call(&self, call_id: &str) -> Result<(), VoiceError> {
        let url = format!("{}/v2/stop-call/{}", self.config.api_url, call_id);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(call_id = %call_id, status = status.as_u16(), "Failed to end call");
            return Err(VoiceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        info!(call_id = %call_id, "Ended call");
        Ok(())
    }

    /// Fetch the call record and parse its transcript.
    ///
    /// A record with no transcript text yields [`CallTranscript::empty`]
    /// (with whatever status fields the record carried): a call that
    /// produced no speech is a normal outcome.
    pub async fn get_transcript(&self, call_id: &str) -> Result<CallTranscript, VoiceError> {
        let url = format!("{}/v2/get-call/{}", self.config.api_url, call_id);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(VoiceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let record: CallRecord = response.json().await?;
        let duration_seconds = record.duration_seconds();

        let raw = record.transcript.unwrap_or_default();
        let formatted = parse_provider_transcript(&raw);

        Ok(CallTranscript {
            raw,
            formatted,
            duration_seconds,
            call_status: record.call_status,
            disconnection_reason: record.disconnection_reason,
        })
    }

    /// Poll for the finalized transcript with bounded backoff.
    ///
    /// Retries [`get_transcript`](Self::get_transcript) until it returns a
    /// non-empty transcript or the attempts are exhausted, sleeping 400ms,
    /// 800ms, 1.6s, ... between fetches. Exhaustion returns the last
    /// (possibly empty) fetch rather than an error.
    pub async fn wait_for_transcript(&self, call_id: &str) -> Result<CallTranscript, VoiceError> {
        let mut delay = POLL_INITIAL_DELAY;
        let mut last = CallTranscript::empty();

        for attempt in 1..=POLL_ATTEMPTS {
            last = self.get_transcript(call_id).await?;
            if !last.is_empty() {
                debug!(call_id = %call_id, attempt, "Transcript available");
                return Ok(last);
            }
            if attempt < POLL_ATTEMPTS {
                tokio::time::sleep(delay).await;
                delay *= POLL_BACKOFF_MULTIPLIER;
            }
        }

        warn!(call_id = %call_id, "Transcript still empty after polling");
        Ok(last)
    }

    /// Delete a provisioned agent, best-effort.
    ///
    /// Cleanup failures must never abort a caller's broader flow: errors are
    /// logged and reported as `false`.
    pub async fn delete_agent(&self, agent_id: &str) -> bool {
        let url = format!("{}/delete-agent/{}", self.config.api_url, agent_id);
        match self
            .http
            .delete(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                debug!(agent_id = %agent_id, "Deleted agent");
                true
            }
            Ok(response) => {
                warn!(agent_id = %agent_id, status = response.status().as_u16(), "Failed to delete agent");
                false
            }
            Err(err) => {
                warn!(agent_id = %agent_id, error = %err, "Failed to delete agent");
                false
            }
        }
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, VoiceError> {
        let url = format!("{}{}", self.config.api_url, path);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(VoiceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_api_key() {
        let result = RetellClient::new(RetellConfig::default());
        assert!(matches!(result, Err(VoiceError::Config(_))));
    }

    #[test]
    fn test_new_accepts_configured_key() {
        let config = RetellConfig::builder().api_key("key-123").build();
        let client = RetellClient::new(config).unwrap();
        assert_eq!(client.config().api_key, "key-123");
    }

    // Integration tests against the live provider.
    #[tokio::test]
    #[ignore]
    async fn test_agent_lifecycle_against_provider() {
        let _ = dotenvy::dotenv();
        let client = RetellClient::from_env().unwrap();

        let agent = client
            .create_agent(CreateAgentParams {
                name: "integration-test".to_string(),
                prompt: "You are a test customer. Say hello.".to_string(),
                voice_id: String::new(),
                first_message: Some("Hello?".to_string()),
            })
            .await
            .unwrap();

        assert!(client.delete_agent(&agent.agent_id).await);
    }
}
