//! Route handlers for the training server.

pub mod admin;
pub mod analysis;
pub mod calls;
pub mod health;
pub mod scenarios;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/api/health", get(health::health))
        // Scenarios
        .route(
            "/api/scenarios",
            get(scenarios::list).post(scenarios::create),
        )
        .route("/api/scenarios/meta/voices", get(scenarios::voices))
        .route(
            "/api/scenarios/:id",
            get(scenarios::get_by_id)
                .put(scenarios::update)
                .delete(scenarios::delete),
        )
        // Call lifecycle
        .route(
            "/api/calls/create-training-call",
            post(calls::create_training_call),
        )
        .route("/api/calls/end", post(calls::end_call))
        .route("/api/calls/status/:call_id", get(calls::status))
        .route("/api/calls/transcript/:call_id", get(calls::transcript))
        // Analysis
        .route("/api/analysis/analyze", post(analysis::analyze))
        .route("/api/analysis/sentiment", post(analysis::sentiment))
        // Admin
        .route("/api/admin/scrape-company", post(admin::scrape_company))
        .route("/api/admin/apply-company", post(admin::apply_company))
        .route("/api/admin/current-config", get(admin::current_config))
        .route("/api/admin/load-transcript", post(admin::load_transcript))
        .route("/api/admin/update-config", post(admin::update_config))
}
