//! Call session registry.
//!
//! A session exists only between call creation and call end. It is owned by
//! the process that created it: not persisted, not shared across processes,
//! lost on restart. [`SessionStore`] is the seam for swapping in an external
//! store for multi-instance deployments; [`MemorySessionStore`] is the
//! single-process implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::types::{CompanyProfile, Scenario};

/// Ephemeral bookkeeping for one in-flight training call.
///
/// Carries snapshots of the scenario and company profile as they were at
/// call creation, so later edits to either do not change an in-flight call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSession {
    /// Call ID assigned by the voice provider.
    pub call_id: String,
    /// Provider agent ID provisioned for this call.
    pub agent_id: String,
    /// Provider LLM config ID backing the agent.
    pub llm_id: String,
    pub scenario_id: String,
    pub scenario: Scenario,
    pub company: CompanyProfile,
    /// RFC 3339 timestamp of call creation.
    pub started_at: String,
}

/// Registry of in-flight call sessions, keyed by provider call ID.
///
/// Implementations must tolerate a `remove` for a call that is already gone:
/// a concurrent duplicate "end call" request observes `None`, and callers
/// treat that as non-fatal.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Record a session at call creation. Replaces any existing entry for
    /// the same call ID.
    async fn insert(&self, session: CallSession);

    /// Look up a session without removing it.
    async fn get(&self, call_id: &str) -> Option<CallSession>;

    /// Remove and return a session at call end.
    async fn remove(&self, call_id: &str) -> Option<CallSession>;

    /// Number of in-flight sessions.
    async fn len(&self) -> usize;
}

/// In-memory [`SessionStore`] for single-instance deployments.
///
/// Entries are never proactively expired: a call that is created but never
/// ended keeps its entry for the life of the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, CallSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, session: CallSession) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.call_id.clone(), session);
    }

    async fn get(&self, call_id: &str) -> Option<CallSession> {
        let sessions = self.sessions.read().await;
        sessions.get(call_id).cloned()
    }

    async fn remove(&self, call_id: &str) -> Option<CallSession> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(call_id)
    }

    async fn len(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BrandColors, Pricing};

    fn sample_session(call_id: &str) -> CallSession {
        CallSession {
            call_id: call_id.to_string(),
            agent_id: "agent_1".to_string(),
            llm_id: "llm_1".to_string(),
            scenario_id: "angry-customer".to_string(),
            scenario: serde_json::from_str(
                r#"{"id": "angry-customer", "name": "Angry Customer", "systemPrompt": "You are angry."}"#,
            )
            .unwrap(),
            company: CompanyProfile {
                name: "Acme".to_string(),
                phone: String::new(),
                website: String::new(),
                logo_url: None,
                colors: BrandColors {
                    primary: "#000000".to_string(),
                    secondary: "#ffffff".to_string(),
                },
                service_areas: vec![],
                services: vec![],
                pricing: Pricing {
                    quarterly: "$0".to_string(),
                    initial: "$0".to_string(),
                },
                guarantees: vec![],
                value_props: vec![],
                hours: String::new(),
            },
            started_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemorySessionStore::new();
        store.insert(sample_session("call_1")).await;

        let session = store.get("call_1").await.unwrap();
        assert_eq!(session.agent_id, "agent_1");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove_returns_session_once() {
        let store = MemorySessionStore::new();
        store.insert(sample_session("call_1")).await;

        assert!(store.remove("call_1").await.is_some());
        // A duplicate end request observes None and must treat it as non-fatal.
        assert!(store.remove("call_1").await.is_none());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_get_unknown_call_is_none() {
        let store = MemorySessionStore::new();
        assert!(store.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_insert_replaces_same_call_id() {
        let store = MemorySessionStore::new();
        store.insert(sample_session("call_1")).await;

        let mut replacement = sample_session("call_1");
        replacement.agent_id = "agent_2".to_string();
        store.insert(replacement).await;

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("call_1").await.unwrap().agent_id, "agent_2");
    }
}
