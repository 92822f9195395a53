//! Application state shared across handlers.

use std::sync::Arc;

use coach_brain::CoachBrain;
use datastore::{ConfigStore, ScenarioStore};
use site_intel::SiteScraper;
use trainer_core::SessionStore;
use voice_agent::RetellClient;

/// Shared application state.
///
/// Everything here is constructor-injected so tests can build isolated
/// instances (notably the session store, which would otherwise tempt a
/// module-level map).
#[derive(Clone)]
pub struct AppState {
    /// Tenant configuration store.
    pub config_store: Arc<ConfigStore>,
    /// Scenario repository.
    pub scenario_store: Arc<ScenarioStore>,
    /// In-flight call sessions.
    pub sessions: Arc<dyn SessionStore>,
    /// Voice provider client.
    pub voice: RetellClient,
    /// Transcript analysis brain.
    pub brain: Arc<CoachBrain>,
    /// Website scraper.
    pub scraper: Arc<SiteScraper>,
}
