//! Admin configuration routes: tenant bootstrap and settings.

use axum::extract::State;
use axum::Json;
use coach_brain::{Analysis, AnalysisKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use trainer_core::prompt::AnalysisContext;
use trainer_core::TenantConfig;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// How much scraped text to echo back for review.
const TEXT_PREVIEW_CHARS: usize = 500;

/// Request to scrape a company website.
#[derive(Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
}

/// Scrape payload: site facts plus extracted intelligence, for the admin to
/// review before applying.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeData {
    pub url: String,
    pub logo_url: Option<String>,
    pub colors: site_intel::SiteColors,
    pub metadata: site_intel::SiteMetadata,
    pub pages_fetched: Vec<String>,
    pub text_preview: String,
    /// Structured company facts mined from the site text.
    pub intelligence: Analysis,
}

/// Response for a scrape.
#[derive(Serialize)]
pub struct ScrapeResponse {
    pub success: bool,
    pub data: ScrapeData,
}

/// Request to apply reviewed company data to the configuration.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyCompanyRequest {
    pub company_data: Value,
}

/// Response carrying the updated configuration.
#[derive(Serialize)]
pub struct ConfigResponse {
    pub success: bool,
    pub config: TenantConfig,
}

/// Request to mine a pasted transcript for intelligence.
#[derive(Deserialize)]
pub struct LoadTranscriptRequest {
    pub transcript: String,
}

/// Response for a transcript load.
#[derive(Serialize)]
pub struct LoadTranscriptResponse {
    pub success: bool,
    pub intelligence: Analysis,
}

/// Scrape a company website and extract structured facts from its text.
///
/// Stateless: nothing is persisted until the admin applies the reviewed data
/// via [`apply_company`].
pub async fn scrape_company(
    State(state): State<AppState>,
    Json(request): Json<ScrapeRequest>,
) -> Result<Json<ScrapeResponse>> {
    if request.url.trim().is_empty() {
        return Err(ApiError::Validation("url is required".to_string()));
    }

    let site = state.scraper.scrape(&request.url).await?;

    let intelligence = state
        .brain
        .analyze(AnalysisKind::Extract, &site.text, &AnalysisContext::default())
        .await?;

    let text_preview: String = site.text.chars().take(TEXT_PREVIEW_CHARS).collect();
    info!(url = %site.url, pages = site.pages_fetched.len(), "Scraped company site");

    Ok(Json(ScrapeResponse {
        success: true,
        data: ScrapeData {
            url: site.url,
            logo_url: site.logo_url,
            colors: site.colors,
            metadata: site.metadata,
            pages_fetched: site.pages_fetched,
            text_preview,
            intelligence,
        },
    }))
}

/// Merge reviewed company data into the tenant configuration.
pub async fn apply_company(
    State(state): State<AppState>,
    Json(request): Json<ApplyCompanyRequest>,
) -> Result<Json<ConfigResponse>> {
    if !request.company_data.is_object() {
        return Err(ApiError::Validation(
            "companyData must be an object".to_string(),
        ));
    }

    let config = state.config_store.apply_company(request.company_data).await?;
    info!(company = %config.company.name, "Applied company data");

    Ok(Json(ConfigResponse {
        success: true,
        config,
    }))
}

/// The full current configuration.
pub async fn current_config(State(state): State<AppState>) -> Result<Json<TenantConfig>> {
    Ok(Json(state.config_store.load().await?))
}

/// Mine a pasted transcript for company intelligence and accumulate the
/// facts into the configuration.
///
/// A reply that does not parse is returned raw and not persisted.
pub async fn load_transcript(
    State(state): State<AppState>,
    Json(request): Json<LoadTranscriptRequest>,
) -> Result<Json<LoadTranscriptResponse>> {
    if request.transcript.trim().is_empty() {
        return Err(ApiError::Validation("transcript is required".to_string()));
    }

    let intelligence = state
        .brain
        .analyze(
            AnalysisKind::Extract,
            &request.transcript,
            &AnalysisContext::default(),
        )
        .await?;

    if let Some(facts) = intelligence.value() {
        state.config_store.record_intelligence(facts.clone()).await?;
    }

    Ok(Json(LoadTranscriptResponse {
        success: true,
        intelligence,
    }))
}

/// Deep-merge a partial configuration into the stored record.
pub async fn update_config(
    State(state): State<AppState>,
    Json(partial): Json<Value>,
) -> Result<Json<ConfigResponse>> {
    if !partial.is_object() {
        return Err(ApiError::Validation(
            "config update must be an object".to_string(),
        ));
    }

    let config = state.config_store.merge_update(partial).await?;
    Ok(Json(ConfigResponse {
        success: true,
        config,
    }))
}
