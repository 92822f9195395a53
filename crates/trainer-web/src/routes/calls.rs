//! Call lifecycle routes.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use trainer_core::prompt::build_agent_prompt;
use trainer_core::{CallSession, Scenario};
use voice_agent::{CallTranscript, CreateAgentParams};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Audio sample rate the browser client plays at.
const SAMPLE_RATE: u32 = 24_000;

/// Request to start a training call.
///
/// Either an ID of a stored scenario or a full ad-hoc scenario body.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCallRequest {
    pub scenario_id: Option<String>,
    pub scenario: Option<Scenario>,
}

/// Response for a started call.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCallResponse {
    pub success: bool,
    pub call_id: String,
    pub agent_id: String,
    pub access_token: String,
    pub sample_rate: u32,
}

/// Request to end a call.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndCallRequest {
    pub call_id: String,
}

/// Summary of a tracked call session.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallInfo {
    pub call_id: String,
    pub agent_id: String,
    pub scenario_id: String,
    pub scenario_name: String,
    pub started_at: String,
}

impl From<&CallSession> for CallInfo {
    fn from(session: &CallSession) -> Self {
        Self {
            call_id: session.call_id.clone(),
            agent_id: session.agent_id.clone(),
            scenario_id: session.scenario_id.clone(),
            scenario_name: session.scenario.name.clone(),
            started_at: session.started_at.clone(),
        }
    }
}

/// Response for an ended call.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndCallResponse {
    pub success: bool,
    pub call_id: String,
    pub transcript: CallTranscript,
    /// Absent when the session was already gone (duplicate end, restart).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_info: Option<CallInfo>,
}

/// Response for a status lookup.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub success: bool,
    pub call_info: CallInfo,
}

/// Response for a transcript fetch.
#[derive(Serialize)]
pub struct TranscriptResponse {
    pub success: bool,
    pub transcript: CallTranscript,
}

/// Start a training call: resolve the scenario, provision a voice agent,
/// open a web call, and record the session.
pub async fn create_training_call(
    State(state): State<AppState>,
    Json(request): Json<CreateCallRequest>,
) -> Result<Json<CreateCallResponse>> {
    let config = state.config_store.load().await?;

    let scenario = match (request.scenario, request.scenario_id) {
        (Some(scenario), _) => scenario,
        (None, Some(id)) => state.scenario_store.get(&id, &config.company).await?,
        (None, None) => {
            return Err(ApiError::Validation(
                "scenarioId or scenario is required".to_string(),
            ))
        }
    };

    let prompt = build_agent_prompt(&scenario, &config.company);
    let voice_id = scenario
        .voice_id
        .clone()
        .unwrap_or_else(|| config.settings.default_voice_id.clone());

    let agent = state
        .voice
        .create_agent(CreateAgentParams {
            name: format!("training-{}", scenario.id),
            prompt,
            voice_id,
            first_message: scenario.opening_line.clone(),
        })
        .await?;

    let call = state.voice.create_web_call(&agent.agent_id).await?;

    state
        .sessions
        .insert(CallSession {
            call_id: call.call_id.clone(),
            agent_id: agent.agent_id.clone(),
            llm_id: agent.llm_id,
            scenario_id: scenario.id.clone(),
            scenario,
            company: config.company,
            started_at: chrono::Utc::now().to_rfc3339(),
        })
        .await;

    info!(call_id = %call.call_id, "Training call started");
    Ok(Json(CreateCallResponse {
        success: true,
        call_id: call.call_id,
        agent_id: agent.agent_id,
        access_token: call.access_token,
        sample_rate: SAMPLE_RATE,
    }))
}

/// End a call: drop the session, terminate the provider call, poll for the
/// finalized transcript, and clean up the agent best-effort.
pub async fn end_call(
    State(state): State<AppState>,
    Json(request): Json<EndCallRequest>,
) -> Result<Json<EndCallResponse>> {
    if request.call_id.is_empty() {
        return Err(ApiError::Validation("callId is required".to_string()));
    }

    // A missing session is non-fatal: a duplicate end request or a restart
    // still ends the provider call and fetches what transcript there is.
    let session = state.sessions.remove(&request.call_id).await;
    if session.is_none() {
        warn!(call_id = %request.call_id, "Ending call with no tracked session");
    }

    state.voice.end_call(&request.call_id).await?;
    let transcript = state.voice.wait_for_transcript(&request.call_id).await?;

    if let Some(ref session) = session {
        state.voice.delete_agent(&session.agent_id).await;
    }

    info!(call_id = %request.call_id, duration = transcript.duration_seconds, "Training call ended");
    Ok(Json(EndCallResponse {
        success: true,
        call_id: request.call_id,
        call_info: session.as_ref().map(CallInfo::from),
        transcript,
    }))
}

/// Look up a tracked call session.
pub async fn status(
    State(state): State<AppState>,
    Path(call_id): Path<String>,
) -> Result<Json<StatusResponse>> {
    let session = state
        .sessions
        .get(&call_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("call {call_id}")))?;

    Ok(Json(StatusResponse {
        success: true,
        call_info: CallInfo::from(&session),
    }))
}

/// Fetch the current transcript for a call, tracked or not.
pub async fn transcript(
    State(state): State<AppState>,
    Path(call_id): Path<String>,
) -> Result<Json<TranscriptResponse>> {
    let transcript = state.voice.get_transcript(&call_id).await?;
    Ok(Json(TranscriptResponse {
        success: true,
        transcript,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use tempfile::TempDir;

    use crate::routes::testutil::{request, test_app};

    #[tokio::test]
    async fn test_status_unknown_call_is_404() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        let (status, body) = request(&app, "GET", "/api/calls/status/call_missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("call_missing"));
    }

    #[tokio::test]
    async fn test_end_call_requires_call_id() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        let (status, body) =
            request(&app, "POST", "/api/calls/end", Some(json!({"callId": ""}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("callId"));
    }

    #[tokio::test]
    async fn test_create_call_requires_scenario() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        let (status, body) = request(
            &app,
            "POST",
            "/api/calls/create-training-call",
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("scenario"));
    }

    #[tokio::test]
    async fn test_create_call_with_unknown_scenario_is_404() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        let (status, _) = request(
            &app,
            "POST",
            "/api/calls/create-training-call",
            Some(json!({"scenarioId": "missing"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
