//! Shared data model for scenarios and the tenant configuration.

use serde::{Deserialize, Serialize};

/// A reusable definition of a customer persona and situation used to
/// configure a simulated call.
///
/// `situation` and `customer_background` may contain `{{company.*}}` template
/// tokens that are resolved against the tenant configuration when scenarios
/// are read. `system_prompt` is left unresolved until call creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub system_prompt: String,
    #[serde(default)]
    pub situation: String,
    #[serde(default)]
    pub customer_background: String,
    #[serde(default)]
    pub personality: Option<String>,
    #[serde(default)]
    pub emotional_state: Option<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub escalation_triggers: Vec<String>,
    #[serde(default)]
    pub de_escalation_responses: Vec<String>,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub resolution_conditions: Vec<String>,
    #[serde(default)]
    pub voice_id: Option<String>,
    #[serde(default)]
    pub opening_line: Option<String>,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A partial scenario used for updates. Only present fields overwrite the
/// stored scenario.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioPatch {
    pub name: Option<String>,
    pub system_prompt: Option<String>,
    pub situation: Option<String>,
    pub customer_background: Option<String>,
    pub personality: Option<String>,
    pub emotional_state: Option<String>,
    pub goals: Option<Vec<String>>,
    pub escalation_triggers: Option<Vec<String>>,
    pub de_escalation_responses: Option<Vec<String>>,
    pub key_points: Option<Vec<String>>,
    pub resolution_conditions: Option<Vec<String>>,
    pub voice_id: Option<String>,
    pub opening_line: Option<String>,
}

impl Scenario {
    /// Apply a patch in place, overwriting only the fields the patch carries.
    pub fn apply(&mut self, patch: ScenarioPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(system_prompt) = patch.system_prompt {
            self.system_prompt = system_prompt;
        }
        if let Some(situation) = patch.situation {
            self.situation = situation;
        }
        if let Some(customer_background) = patch.customer_background {
            self.customer_background = customer_background;
        }
        if let Some(personality) = patch.personality {
            self.personality = Some(personality);
        }
        if let Some(emotional_state) = patch.emotional_state {
            self.emotional_state = Some(emotional_state);
        }
        if let Some(goals) = patch.goals {
            self.goals = goals;
        }
        if let Some(escalation_triggers) = patch.escalation_triggers {
            self.escalation_triggers = escalation_triggers;
        }
        if let Some(de_escalation_responses) = patch.de_escalation_responses {
            self.de_escalation_responses = de_escalation_responses;
        }
        if let Some(key_points) = patch.key_points {
            self.key_points = key_points;
        }
        if let Some(resolution_conditions) = patch.resolution_conditions {
            self.resolution_conditions = resolution_conditions;
        }
        if let Some(voice_id) = patch.voice_id {
            self.voice_id = Some(voice_id);
        }
        if let Some(opening_line) = patch.opening_line {
            self.opening_line = Some(opening_line);
        }
    }
}

/// Brand colors extracted from or configured for the tenant's website.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandColors {
    pub primary: String,
    pub secondary: String,
}

/// Pricing facts injected into prompts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub quarterly: String,
    pub initial: String,
}

/// The tenant's branding and business facts, injected into prompts via
/// template substitution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,
    pub phone: String,
    pub website: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    pub colors: BrandColors,
    #[serde(default)]
    pub service_areas: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
    pub pricing: Pricing,
    #[serde(default)]
    pub guarantees: Vec<String>,
    #[serde(default)]
    pub value_props: Vec<String>,
    #[serde(default)]
    pub hours: String,
}

/// Process-wide settings for call behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantSettings {
    pub default_voice_id: String,
    /// Maximum call length in seconds.
    pub call_timeout: u64,
    pub analytics_enabled: bool,
}

/// The single tenant-wide configuration record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantConfig {
    pub company: CompanyProfile,
    pub settings: TenantSettings,
    /// Accumulated facts mined from transcripts and scraped websites.
    /// Free-form: shape depends on what the extraction model returns.
    #[serde(default)]
    pub extracted_intelligence: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_scenario() -> Scenario {
        Scenario {
            id: "angry-customer".to_string(),
            name: "Angry Customer".to_string(),
            system_prompt: "You are angry.".to_string(),
            situation: "Billing dispute".to_string(),
            customer_background: "Long-time customer".to_string(),
            personality: Some("Impatient".to_string()),
            emotional_state: Some("Angry".to_string()),
            goals: vec!["Get a refund".to_string()],
            escalation_triggers: vec![],
            de_escalation_responses: vec![],
            key_points: vec![],
            resolution_conditions: vec![],
            voice_id: None,
            opening_line: None,
            is_custom: false,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_patch_overwrites_only_present_fields() {
        let mut scenario = sample_scenario();
        scenario.apply(ScenarioPatch {
            name: Some("Very Angry Customer".to_string()),
            ..Default::default()
        });

        assert_eq!(scenario.name, "Very Angry Customer");
        assert_eq!(scenario.system_prompt, "You are angry.");
        assert_eq!(scenario.personality.as_deref(), Some("Impatient"));
    }

    #[test]
    fn test_scenario_wire_format_is_camel_case() {
        let scenario = sample_scenario();
        let json = serde_json::to_value(&scenario).unwrap();

        assert!(json.get("systemPrompt").is_some());
        assert!(json.get("customerBackground").is_some());
        assert!(json.get("isCustom").is_some());
        assert!(json.get("system_prompt").is_none());
    }

    #[test]
    fn test_scenario_deserializes_with_missing_optionals() {
        let scenario: Scenario = serde_json::from_str(
            r#"{"id": "x", "name": "X", "systemPrompt": "Be brief."}"#,
        )
        .unwrap();

        assert!(scenario.goals.is_empty());
        assert!(!scenario.is_custom);
        assert!(scenario.opening_line.is_none());
    }
}
