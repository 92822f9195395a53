//! Tenant configuration store backed by a single JSON file.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{info, warn};

use trainer_core::TenantConfig;

use crate::error::Result;
use crate::merge::deep_merge;

/// Store for the single tenant-wide configuration record.
///
/// On load, a saved file is deep-merged **onto** the hard-coded defaults, so
/// default fields added after the file was written still appear; the file's
/// values win on every conflict, and arrays replace atomically. All accesses
/// serialize through one in-process mutex; last writer still wins across
/// processes.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// The hard-coded default configuration: a fully populated sample tenant.
    pub fn default_config() -> TenantConfig {
        serde_json::from_value(Self::default_value())
            .expect("default configuration is well-formed")
    }

    fn default_value() -> Value {
        json!({
            "company": {
                "name": "Desert Shield Pest Control",
                "phone": "(480) 555-0142",
                "website": "https://desertshieldpest.example.com",
                "logoUrl": null,
                "colors": {
                    "primary": "#2c5f2d",
                    "secondary": "#97bc62"
                },
                "serviceAreas": ["Phoenix", "Mesa", "Tempe", "Scottsdale"],
                "services": [
                    "General pest control",
                    "Termite treatment",
                    "Scorpion control",
                    "Rodent exclusion"
                ],
                "pricing": {
                    "quarterly": "$129",
                    "initial": "$99"
                },
                "guarantees": [
                    "Free re-service between scheduled visits",
                    "100% satisfaction money-back guarantee"
                ],
                "valueProps": [
                    "Family owned and operated for 20 years",
                    "Licensed and insured technicians"
                ],
                "hours": "Mon-Fri 8am-6pm, Sat 9am-1pm"
            },
            "settings": {
                "defaultVoiceId": "11labs-Adrian",
                "callTimeout": 600,
                "analyticsEnabled": true
            },
            "extractedIntelligence": {}
        })
    }

    /// Load the configuration, creating the file with defaults if absent.
    ///
    /// A file that exists but does not parse is treated like a missing file
    /// (defaults win, with a warning) rather than an error: branding settings
    /// are not worth refusing to boot over.
    pub async fn load(&self) -> Result<TenantConfig> {
        let _guard = self.lock.lock().await;
        self.load_unlocked().await
    }

    /// Serialize and overwrite the backing file.
    ///
    /// Returns `false` (after logging) on any failure instead of erroring;
    /// callers must check the boolean.
    pub async fn save(&self, config: &TenantConfig) -> bool {
        let _guard = self.lock.lock().await;
        match self.write_unlocked(config).await {
            Ok(()) => true,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Failed to save config");
                false
            }
        }
    }

    /// Deep-merge scraped or edited company data into `company` and persist.
    pub async fn apply_company(&self, company_data: Value) -> Result<TenantConfig> {
        self.merge_update(json!({ "company": company_data })).await
    }

    /// Deep-merge a partial configuration into the stored record and persist.
    pub async fn merge_update(&self, partial: Value) -> Result<TenantConfig> {
        let _guard = self.lock.lock().await;

        let current = self.load_unlocked().await?;
        let mut merged = serde_json::to_value(&current)?;
        deep_merge(&mut merged, partial);

        let updated: TenantConfig = serde_json::from_value(merged)?;
        self.write_unlocked(&updated).await?;
        Ok(updated)
    }

    /// Accumulate extracted facts into `extracted_intelligence` and persist.
    ///
    /// Facts merge onto whatever is already recorded, so successive website
    /// scrapes and transcript loads build up rather than overwrite.
    pub async fn record_intelligence(&self, facts: Value) -> Result<TenantConfig> {
        let _guard = self.lock.lock().await;

        let mut current = self.load_unlocked().await?;
        if !current.extracted_intelligence.is_object() {
            current.extracted_intelligence = json!({});
        }
        deep_merge(&mut current.extracted_intelligence, facts);
        deep_merge(
            &mut current.extracted_intelligence,
            json!({ "lastUpdated": chrono::Utc::now().to_rfc3339() }),
        );

        self.write_unlocked(&current).await?;
        Ok(current)
    }

    async fn load_unlocked(&self) -> Result<TenantConfig> {
        if !file_exists(&self.path).await {
            let defaults = Self::default_config();
            self.write_unlocked(&defaults).await?;
            info!(path = %self.path.display(), "Created default config");
            return Ok(defaults);
        }

        let raw = tokio::fs::read_to_string(&self.path).await?;
        let file_value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Config file unreadable, using defaults");
                return Ok(Self::default_config());
            }
        };

        let mut merged = Self::default_value();
        deep_merge(&mut merged, file_value);
        Ok(serde_json::from_value(merged)?)
    }

    async fn write_unlocked(&self, config: &TenantConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let serialized = serde_json::to_string_pretty(config)?;
        tokio::fs::write(&self.path, serialized).await?;
        Ok(())
    }
}

async fn file_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join("config.json"))
    }

    #[tokio::test]
    async fn test_load_creates_file_with_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let config = store.load().await.unwrap();

        assert_eq!(config, ConfigStore::default_config());
        assert!(dir.path().join("config.json").exists());
    }

    #[tokio::test]
    async fn test_saved_values_survive_reload_with_defaults_merged() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut config = store.load().await.unwrap();
        config.company.name = "X".to_string();
        assert!(store.save(&config).await);

        let reloaded = store.load().await.unwrap();
        assert_eq!(reloaded.company.name, "X");
        // Untouched default keys remain present: merge, not replace.
        assert_eq!(reloaded.settings.call_timeout, 600);
    }

    #[tokio::test]
    async fn test_partial_file_gains_missing_default_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, r#"{"company": {"name": "Sparse Co"}}"#)
            .await
            .unwrap();

        let config = ConfigStore::new(&path).load().await.unwrap();
        assert_eq!(config.company.name, "Sparse Co");
        assert_eq!(config.settings.default_voice_id, "11labs-Adrian");
        assert!(!config.company.services.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, "not json {").await.unwrap();

        let config = ConfigStore::new(&path).load().await.unwrap();
        assert_eq!(config, ConfigStore::default_config());
    }

    #[tokio::test]
    async fn test_apply_company_merges_and_persists() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let updated = store
            .apply_company(json!({"name": "Scraped Co", "phone": "(602) 555-0100"}))
            .await
            .unwrap();
        assert_eq!(updated.company.name, "Scraped Co");

        let reloaded = store.load().await.unwrap();
        assert_eq!(reloaded.company.phone, "(602) 555-0100");
        // Untouched company fields keep their defaults.
        assert_eq!(reloaded.company.pricing.quarterly, "$129");
    }

    #[tokio::test]
    async fn test_record_intelligence_accumulates() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store
            .record_intelligence(json!({"competitors": ["Bugs-B-Gone"]}))
            .await
            .unwrap();
        let config = store
            .record_intelligence(json!({"commonObjections": ["price"]}))
            .await
            .unwrap();

        let intel = config.extracted_intelligence;
        assert_eq!(intel["competitors"], json!(["Bugs-B-Gone"]));
        assert_eq!(intel["commonObjections"], json!(["price"]));
        assert!(intel.get("lastUpdated").is_some());
    }

    #[tokio::test]
    async fn test_save_reports_failure_without_erroring() {
        // Point the store at a path whose parent is a regular file, so the
        // write must fail.
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        tokio::fs::write(&blocker, "x").await.unwrap();

        let store = ConfigStore::new(blocker.join("config.json"));
        assert!(!store.save(&ConfigStore::default_config()).await);
    }
}
