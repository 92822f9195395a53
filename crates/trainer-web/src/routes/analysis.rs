//! Transcript analysis routes.

use axum::extract::State;
use axum::Json;
use coach_brain::{Analysis, AnalysisKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use trainer_core::prompt::AnalysisContext;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Request for a call analysis.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub transcript: String,
    /// Scenario the call ran against; only `name` is consulted.
    pub scenario: Option<Value>,
    /// Call length in seconds.
    pub call_duration: Option<u64>,
    /// Analysis mode; defaults to "coaching".
    #[serde(rename = "type")]
    pub analysis_type: Option<String>,
}

/// Response wrapping an analysis payload.
#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: Analysis,
}

/// Request for a sentiment classification.
#[derive(Deserialize)]
pub struct SentimentRequest {
    pub text: String,
}

/// Response for a sentiment classification.
///
/// `sentiment` and `confidence` are surfaced from the parsed payload; when
/// the model reply did not parse, they are null and `raw` carries the text.
#[derive(Serialize)]
pub struct SentimentResponse {
    pub success: bool,
    pub sentiment: Value,
    pub confidence: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

/// Produce a coaching scorecard (or another analysis mode) for a transcript.
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>> {
    if request.transcript.trim().is_empty() {
        return Err(ApiError::Validation("transcript is required".to_string()));
    }

    let kind: AnalysisKind = request
        .analysis_type
        .as_deref()
        .unwrap_or("coaching")
        .parse()
        .map_err(ApiError::Brain)?;

    let context = AnalysisContext {
        scenario_name: request
            .scenario
            .as_ref()
            .and_then(|scenario| scenario.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string),
        call_duration_seconds: request.call_duration,
    };

    let analysis = state.brain.analyze(kind, &request.transcript, &context).await?;
    Ok(Json(AnalyzeResponse {
        success: true,
        analysis,
    }))
}

/// Classify the sentiment of a short text.
pub async fn sentiment(
    State(state): State<AppState>,
    Json(request): Json<SentimentRequest>,
) -> Result<Json<SentimentResponse>> {
    if request.text.trim().is_empty() {
        return Err(ApiError::Validation("text is required".to_string()));
    }

    let analysis = state
        .brain
        .analyze(
            AnalysisKind::Sentiment,
            &request.text,
            &AnalysisContext::default(),
        )
        .await?;

    let response = match analysis {
        Analysis::Parsed(value) => SentimentResponse {
            success: true,
            sentiment: value.get("sentiment").cloned().unwrap_or(Value::Null),
            confidence: value.get("confidence").cloned().unwrap_or(Value::Null),
            raw: None,
        },
        Analysis::Unparsed { raw, .. } => SentimentResponse {
            success: true,
            sentiment: Value::Null,
            confidence: Value::Null,
            raw: Some(raw),
        },
    };

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use tempfile::TempDir;

    use crate::routes::testutil::{request, test_app};

    #[tokio::test]
    async fn test_analyze_requires_transcript() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        let (status, _) = request(
            &app,
            "POST",
            "/api/analysis/analyze",
            Some(json!({"transcript": "  "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_rejects_unknown_type() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        let (status, body) = request(
            &app,
            "POST",
            "/api/analysis/analyze",
            Some(json!({"transcript": "customer: hello", "type": "voodoo"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("voodoo"));
    }

    #[tokio::test]
    async fn test_sentiment_requires_text() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        let (status, _) = request(
            &app,
            "POST",
            "/api/analysis/sentiment",
            Some(json!({"text": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
