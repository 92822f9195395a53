//! HTTP API server for DialCoach CSR call training.
//!
//! Serves the scenario CRUD, call lifecycle, transcript analysis, and admin
//! configuration surfaces consumed by the training client.

mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use coach_brain::CoachBrain;
use datastore::{ConfigStore, ScenarioStore};
use site_intel::SiteScraper;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use trainer_core::{MemorySessionStore, SessionStore};
use voice_agent::RetellClient;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting training server");

    // Stores and provider clients
    let config_store = Arc::new(ConfigStore::new(config.data_dir.join("config.json")));
    let scenario_store = Arc::new(ScenarioStore::new(config.data_dir.join("scenarios.json")));
    let voice = RetellClient::from_env()?;
    let brain = Arc::new(CoachBrain::from_env()?);
    let scraper = Arc::new(SiteScraper::new());
    let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());

    // Materialize the data files (and the defaults) up front.
    let tenant = config_store.load().await?;
    info!(company = %tenant.company.name, "Loaded tenant config");

    // Build application state
    let state = AppState {
        config_store,
        scenario_store,
        sessions,
        voice,
        brain,
        scraper,
    };

    // Restrict CORS to the training client origin
    let cors = CorsLayer::new()
        .allow_origin(config.client_url.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Build router
    let app = routes::router().layer(cors).with_state(state);

    // Start server
    info!(addr = %config.addr, "Training server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
