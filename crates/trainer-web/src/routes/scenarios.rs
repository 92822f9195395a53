//! Scenario CRUD routes.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use trainer_core::{Scenario, ScenarioPatch};

use crate::error::Result;
use crate::state::AppState;

/// Response wrapping a scenario list.
#[derive(Serialize)]
pub struct ScenarioListResponse {
    pub success: bool,
    pub scenarios: Vec<Scenario>,
}

/// Response wrapping a single scenario.
#[derive(Serialize)]
pub struct ScenarioResponse {
    pub success: bool,
    pub scenario: Scenario,
}

/// Response for a deletion.
#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

/// A curated provider voice.
#[derive(Serialize)]
pub struct VoiceInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub gender: &'static str,
}

/// Response wrapping the voice list.
#[derive(Serialize)]
pub struct VoicesResponse {
    pub success: bool,
    pub voices: Vec<VoiceInfo>,
}

/// List all scenarios with templates resolved against the company profile.
pub async fn list(State(state): State<AppState>) -> Result<Json<ScenarioListResponse>> {
    let config = state.config_store.load().await?;
    let scenarios = state.scenario_store.list(&config.company).await?;
    Ok(Json(ScenarioListResponse {
        success: true,
        scenarios,
    }))
}

/// Get one scenario by ID.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ScenarioResponse>> {
    let config = state.config_store.load().await?;
    let scenario = state.scenario_store.get(&id, &config.company).await?;
    Ok(Json(ScenarioResponse {
        success: true,
        scenario,
    }))
}

/// Create a custom scenario.
pub async fn create(
    State(state): State<AppState>,
    Json(data): Json<ScenarioPatch>,
) -> Result<Json<ScenarioResponse>> {
    let scenario = state.scenario_store.create(data).await?;
    Ok(Json(ScenarioResponse {
        success: true,
        scenario,
    }))
}

/// Patch a scenario by ID.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ScenarioPatch>,
) -> Result<Json<ScenarioResponse>> {
    let scenario = state.scenario_store.update(&id, patch).await?;
    Ok(Json(ScenarioResponse {
        success: true,
        scenario,
    }))
}

/// Delete a scenario by ID.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.scenario_store.delete(&id).await?;
    Ok(Json(DeleteResponse {
        success: true,
        message: "Scenario deleted".to_string(),
    }))
}

/// The curated voice list offered by the scenario editor.
pub async fn voices() -> Json<VoicesResponse> {
    Json(VoicesResponse {
        success: true,
        voices: vec![
            VoiceInfo {
                id: "11labs-Adrian",
                name: "Adrian",
                gender: "male",
            },
            VoiceInfo {
                id: "11labs-Kate",
                name: "Kate",
                gender: "female",
            },
            VoiceInfo {
                id: "11labs-Paul",
                name: "Paul",
                gender: "male",
            },
            VoiceInfo {
                id: "11labs-Amy",
                name: "Amy",
                gender: "female",
            },
            VoiceInfo {
                id: "11labs-Jason",
                name: "Jason",
                gender: "male",
            },
            VoiceInfo {
                id: "11labs-Dorothy",
                name: "Dorothy",
                gender: "female",
            },
        ],
    })
}
