//! Request and response types for the voice provider API.

use serde::{Deserialize, Serialize};

/// Parameters for provisioning a remote agent.
#[derive(Debug, Clone)]
pub struct CreateAgentParams {
    /// Display name for the remote agent.
    pub name: String,
    /// The full roleplay prompt.
    pub prompt: String,
    /// Provider voice ID.
    pub voice_id: String,
    /// Line the agent speaks when the call connects.
    pub first_message: Option<String>,
}

/// Identifiers for a provisioned agent and its backing LLM config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionedAgent {
    pub agent_id: String,
    pub llm_id: String,
}

/// A browser-compatible call session opened against an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebCall {
    pub call_id: String,
    pub access_token: String,
}

/// Who spoke a transcript turn, in this product's terms.
///
/// The provider labels the remote agent "Agent" and the human "User"; here
/// the remote agent plays the *customer* and the human trainee is the CSR,
/// so the labels invert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    Customer,
    Csr,
}

/// One parsed turn of a call transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptTurn {
    pub role: TurnRole,
    pub content: String,
}

/// A call transcript in raw and structured form.
///
/// A call that produced no speech yields `raw: ""`, an empty `formatted`
/// list, and zero duration; that is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallTranscript {
    pub raw: String,
    pub formatted: Vec<TranscriptTurn>,
    pub duration_seconds: u64,
    #[serde(default)]
    pub call_status: Option<String>,
    #[serde(default)]
    pub disconnection_reason: Option<String>,
}

impl CallTranscript {
    /// An empty transcript for a call with no recorded speech.
    pub fn empty() -> Self {
        Self {
            raw: String::new(),
            formatted: Vec::new(),
            duration_seconds: 0,
            call_status: None,
            disconnection_reason: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

// -- Provider wire types (snake_case, per the provider's API) --

#[derive(Debug, Serialize)]
pub(crate) struct CreateLlmRequest {
    pub general_prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateLlmResponse {
    pub llm_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResponseEngine {
    #[serde(rename = "type")]
    pub engine_type: &'static str,
    pub llm_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateAgentRequest {
    pub agent_name: String,
    pub voice_id: String,
    pub response_engine: ResponseEngine,
    pub ambient_sound: &'static str,
    pub enable_backchannel: bool,
    pub backchannel_frequency: f32,
    pub interruption_sensitivity: f32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateAgentResponse {
    pub agent_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateWebCallRequest {
    pub agent_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateWebCallResponse {
    pub call_id: String,
    pub access_token: String,
}

/// The provider's call record, of which we consume a small slice.
#[derive(Debug, Deserialize)]
pub(crate) struct CallRecord {
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub call_status: Option<String>,
    #[serde(default)]
    pub disconnection_reason: Option<String>,
    /// Epoch milliseconds.
    #[serde(default)]
    pub start_timestamp: Option<u64>,
    /// Epoch milliseconds.
    #[serde(default)]
    pub end_timestamp: Option<u64>,
}

impl CallRecord {
    /// Call duration in whole seconds, zero when either timestamp is absent.
    pub fn duration_seconds(&self) -> u64 {
        match (self.start_timestamp, self.end_timestamp) {
            (Some(start), Some(end)) if end > start => (end - start) / 1000,
            _ => 0,
        }
    }
}
