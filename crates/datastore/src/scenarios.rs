//! Scenario repository backed by a JSON-array file.

use std::path::{Path, PathBuf};

use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, info};

use trainer_core::template::process_template;
use trainer_core::{CompanyProfile, Scenario, ScenarioPatch};

use crate::error::{DatastoreError, Result};

/// File-backed CRUD store for training scenarios.
///
/// Reads resolve `situation` and `customer_background` through the template
/// engine against the tenant's company profile; `system_prompt` is left
/// unresolved until call creation. Every mutation rewrites the whole file
/// under the store's mutex.
#[derive(Debug)]
pub struct ScenarioStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ScenarioStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// The built-in scenarios seeded on first load.
    pub fn default_scenarios() -> Vec<Scenario> {
        serde_json::from_value(json!([
            {
                "id": "angry-billing",
                "name": "Angry About Billing",
                "systemPrompt": "You believe you were double-charged for last month's service and you are done being patient about it.",
                "situation": "A {{company.name}} customer calls about an unexpected charge on their card.",
                "customerBackground": "Customer for three years on the {{company.pricing.quarterly}} quarterly plan. Never missed a payment.",
                "personality": "Blunt, interrupts, keeps receipts",
                "emotionalState": "Angry",
                "goals": [
                    "Get the duplicate charge refunded",
                    "Get an explanation for how it happened"
                ],
                "escalationTriggers": [
                    "Being put on hold without warning",
                    "Being told to call back later"
                ],
                "deEscalationResponses": [
                    "A clear apology with a concrete refund timeline"
                ],
                "keyPoints": [
                    "Mention the exact double charge",
                    "Threaten to cancel if not resolved today"
                ],
                "resolutionConditions": [
                    "Refund confirmed with a date",
                    "Explanation of the billing error"
                ],
                "voiceId": "11labs-Adrian",
                "openingLine": "Yeah, hi - I just looked at my statement and you charged me twice. Twice!",
                "isCustom": false
            },
            {
                "id": "price-shopper",
                "name": "Price Shopper",
                "systemPrompt": "You are comparing three companies and care mostly about price, but you can be won over by value.",
                "situation": "A prospect in {{company.serviceAreas}} is calling around for quotes.",
                "customerBackground": "Found {{company.name}} online. Has a competitor quote in hand and mentions it early.",
                "personality": "Friendly but noncommittal",
                "emotionalState": "Curious",
                "goals": [
                    "Get a firm price",
                    "Find out what makes this company different"
                ],
                "escalationTriggers": [
                    "Evasive answers about pricing"
                ],
                "deEscalationResponses": [
                    "Straight answers and a clear value comparison"
                ],
                "keyPoints": [
                    "A competitor quoted less",
                    "Ask what is included in the price"
                ],
                "resolutionConditions": [
                    "A quoted price plus at least one differentiator"
                ],
                "voiceId": "11labs-Kate",
                "openingLine": "Hi, I'm getting some quotes for service - can you tell me what you charge?",
                "isCustom": false
            },
            {
                "id": "cancellation-save",
                "name": "Cancellation Save",
                "systemPrompt": "You want to cancel because you have not seen results, but you would stay for a credible fix.",
                "situation": "A current {{company.name}} customer calls to cancel after a disappointing visit.",
                "customerBackground": "Six months of service. The last technician seemed rushed and the problem came back within a week.",
                "personality": "Polite, disappointed, firm",
                "emotionalState": "Frustrated",
                "goals": [
                    "Cancel the service",
                    "Not get talked into anything vague"
                ],
                "escalationTriggers": [
                    "Scripted retention offers that ignore the complaint"
                ],
                "deEscalationResponses": [
                    "Acknowledgement of the bad visit and a specific remedy"
                ],
                "keyPoints": [
                    "The problem returned a week after treatment",
                    "Mention the guarantee that was advertised"
                ],
                "resolutionConditions": [
                    "A free re-service scheduled, or the cancellation processed without pressure"
                ],
                "voiceId": "11labs-Paul",
                "openingLine": "Hi, I need to cancel my account. It's just not working out.",
                "isCustom": false
            }
        ]))
        .expect("default scenarios are well-formed")
    }

    /// List all scenarios with templates resolved against the company profile.
    pub async fn list(&self, company: &CompanyProfile) -> Result<Vec<Scenario>> {
        let _guard = self.lock.lock().await;
        let scenarios = self.read_unlocked().await?;
        Ok(scenarios
            .into_iter()
            .map(|scenario| resolve(scenario, company))
            .collect())
    }

    /// Get one scenario by ID with templates resolved.
    pub async fn get(&self, id: &str, company: &CompanyProfile) -> Result<Scenario> {
        let _guard = self.lock.lock().await;
        let scenarios = self.read_unlocked().await?;
        scenarios
            .into_iter()
            .find(|scenario| scenario.id == id)
            .map(|scenario| resolve(scenario, company))
            .ok_or_else(|| DatastoreError::NotFound(format!("scenario {id}")))
    }

    /// Create a custom scenario.
    ///
    /// Requires non-empty `name` and `system_prompt`. The ID is
    /// `custom-<epoch-millis>`, which is not collision-proof under rapid
    /// concurrent creation.
    pub async fn create(&self, data: ScenarioPatch) -> Result<Scenario> {
        let name = data.name.clone().unwrap_or_default();
        let system_prompt = data.system_prompt.clone().unwrap_or_default();
        if name.trim().is_empty() || system_prompt.trim().is_empty() {
            return Err(DatastoreError::Validation(
                "name and systemPrompt are required".to_string(),
            ));
        }

        let _guard = self.lock.lock().await;
        let mut scenarios = self.read_unlocked().await?;

        let now = chrono::Utc::now();
        let mut scenario = Scenario {
            id: format!("custom-{}", now.timestamp_millis()),
            name: String::new(),
            system_prompt: String::new(),
            situation: String::new(),
            customer_background: String::new(),
            personality: None,
            emotional_state: None,
            goals: Vec::new(),
            escalation_triggers: Vec::new(),
            de_escalation_responses: Vec::new(),
            key_points: Vec::new(),
            resolution_conditions: Vec::new(),
            voice_id: None,
            opening_line: None,
            is_custom: true,
            created_at: Some(now.to_rfc3339()),
            updated_at: None,
        };
        scenario.apply(data);

        debug!(id = %scenario.id, "Creating scenario");
        scenarios.push(scenario.clone());
        self.write_unlocked(&scenarios).await?;
        Ok(scenario)
    }

    /// Patch a scenario by ID, stamping `updated_at`.
    pub async fn update(&self, id: &str, patch: ScenarioPatch) -> Result<Scenario> {
        let _guard = self.lock.lock().await;
        let mut scenarios = self.read_unlocked().await?;

        let scenario = scenarios
            .iter_mut()
            .find(|scenario| scenario.id == id)
            .ok_or_else(|| DatastoreError::NotFound(format!("scenario {id}")))?;

        scenario.apply(patch);
        scenario.updated_at = Some(chrono::Utc::now().to_rfc3339());
        let updated = scenario.clone();

        self.write_unlocked(&scenarios).await?;
        Ok(updated)
    }

    /// Delete a scenario by ID.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut scenarios = self.read_unlocked().await?;

        let before = scenarios.len();
        scenarios.retain(|scenario| scenario.id != id);
        if scenarios.len() == before {
            return Err(DatastoreError::NotFound(format!("scenario {id}")));
        }

        self.write_unlocked(&scenarios).await?;
        Ok(())
    }

    async fn read_unlocked(&self) -> Result<Vec<Scenario>> {
        if !file_exists(&self.path).await {
            let defaults = Self::default_scenarios();
            self.write_unlocked(&defaults).await?;
            info!(path = %self.path.display(), "Seeded default scenarios");
            return Ok(defaults);
        }

        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn write_unlocked(&self, scenarios: &[Scenario]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let serialized = serde_json::to_string_pretty(scenarios)?;
        tokio::fs::write(&self.path, serialized).await?;
        Ok(())
    }
}

/// Resolve the list-time template fields against the company profile.
/// `system_prompt` is deliberately left unresolved here.
fn resolve(mut scenario: Scenario, company: &CompanyProfile) -> Scenario {
    let context = json!({ "company": company });
    scenario.situation = process_template(&scenario.situation, &context);
    scenario.customer_background = process_template(&scenario.customer_background, &context);
    scenario
}

async fn file_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigStore;
    use tempfile::TempDir;

    fn company() -> CompanyProfile {
        ConfigStore::default_config().company
    }

    fn store_in(dir: &TempDir) -> ScenarioStore {
        ScenarioStore::new(dir.path().join("scenarios.json"))
    }

    fn valid_create() -> ScenarioPatch {
        ScenarioPatch {
            name: Some("Angry Customer".to_string()),
            system_prompt: Some("You are angry.".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_first_load_seeds_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let scenarios = store.list(&company()).await.unwrap();
        assert_eq!(scenarios.len(), 3);
        assert!(dir.path().join("scenarios.json").exists());
    }

    #[tokio::test]
    async fn test_list_resolves_templates_but_not_system_prompt() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .create(ScenarioPatch {
                name: Some("Templated".to_string()),
                system_prompt: Some("Mention {{company.name}} yourself.".to_string()),
                situation: Some("Calling {{company.name}} about billing.".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let scenarios = store.list(&company()).await.unwrap();
        let templated = scenarios.iter().find(|s| s.name == "Templated").unwrap();

        assert_eq!(
            templated.situation,
            "Calling Desert Shield Pest Control about billing."
        );
        assert_eq!(templated.system_prompt, "Mention {{company.name}} yourself.");
    }

    #[tokio::test]
    async fn test_create_requires_name_and_system_prompt() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let before = store.list(&company()).await.unwrap().len();

        let result = store
            .create(ScenarioPatch {
                name: Some("No prompt".to_string()),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(DatastoreError::Validation(_))));

        // The stored file is unchanged by the failed create.
        assert_eq!(store.list(&company()).await.unwrap().len(), before);
    }

    #[tokio::test]
    async fn test_create_assigns_custom_id_and_flags() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let scenario = store.create(valid_create()).await.unwrap();
        assert!(scenario.id.starts_with("custom-"));
        assert!(scenario.is_custom);
        assert!(scenario.created_at.is_some());

        let fetched = store.get(&scenario.id, &company()).await.unwrap();
        assert_eq!(fetched.name, "Angry Customer");
    }

    #[tokio::test]
    async fn test_update_patches_and_stamps() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let scenario = store.create(valid_create()).await.unwrap();

        let updated = store
            .update(
                &scenario.id,
                ScenarioPatch {
                    name: Some("Very Angry Customer".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Very Angry Customer");
        assert_eq!(updated.system_prompt, "You are angry.");
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found_and_file_unchanged() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let before = store.list(&company()).await.unwrap();

        let result = store.update("missing", ScenarioPatch::default()).await;
        assert!(matches!(result, Err(DatastoreError::NotFound(_))));
        assert_eq!(store.list(&company()).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let scenario = store.create(valid_create()).await.unwrap();

        store.delete(&scenario.id).await.unwrap();

        let result = store.get(&scenario.id, &company()).await;
        assert!(matches!(result, Err(DatastoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.list(&company()).await.unwrap();

        let result = store.delete("missing").await;
        assert!(matches!(result, Err(DatastoreError::NotFound(_))));
    }
}
