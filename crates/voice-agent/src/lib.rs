//! Client for the Retell conversational-voice API.
//!
//! The training flow provisions a remote LLM config + agent pair per call,
//! opens a browser-compatible "web call" against it, and later fetches the
//! finalized call record to recover the transcript. This crate wraps that
//! lifecycle:
//!
//! - [`RetellClient::create_agent`] / [`RetellClient::create_web_call`]
//! - [`RetellClient::end_call`] and the poll-with-backoff
//!   [`RetellClient::wait_for_transcript`]
//! - [`RetellClient::delete_agent`] - best-effort cleanup that never errors
//!
//! Transcript lines of the form `Agent: ...` / `User: ...` parse into
//! [`TranscriptTurn`]s, with the provider's "Agent" mapped to the `customer`
//! role: in this product the remote agent roleplays the customer.

mod client;
mod config;
mod error;
mod transcript;
mod types;

pub use client::RetellClient;
pub use config::RetellConfig;
pub use error::VoiceError;
pub use transcript::parse_provider_transcript;
pub use types::{
    CallTranscript, CreateAgentParams, ProvisionedAgent, TranscriptTurn, TurnRole, WebCall,
};
