use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSettings {
    pub insights_url: String,
    pub completion_url: String,
    pub completion_model: String,
    pub api_key: Option<String>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            insights_url: "https://api.finsight.app/v1/insights".into(),
            completion_url: "https://api.finsight.app/v1/chat/completions".into(),
            completion_model: "gpt-4o-mini".into(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserSettings {
    providers: ProviderSettings,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            providers: ProviderSettings::default(),
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn providers(&self) -> ProviderSettings {
        self.data.read().unwrap().providers.clone()
    }

    pub fn update_providers(&self, settings: ProviderSettings) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            guard.providers = settings;
            self.persist(&guard)?;
        }
        Ok(())
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_settings_path() -> PathBuf {
        std::env::temp_dir().join(format!("finsight-settings-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let store = SettingsStore::new(temp_settings_path()).unwrap();

        let providers = store.providers();
        assert_eq!(providers.completion_model, "gpt-4o-mini");
        assert!(providers.api_key.is_none());
    }

    #[test]
    fn updates_persist_across_stores() {
        let path = temp_settings_path();

        {
            let store = SettingsStore::new(path.clone()).unwrap();
            let mut providers = store.providers();
            providers.completion_model = "gpt-4o".into();
            store.update_providers(providers).unwrap();
        }

        let reopened = SettingsStore::new(path.clone()).unwrap();
        assert_eq!(reopened.providers().completion_model, "gpt-4o");

        let _ = fs::remove_file(path);
    }

    #[test]
    fn unreadable_file_falls_back_to_defaults() {
        let path = temp_settings_path();
        fs::write(&path, "not json").unwrap();

        let store = SettingsStore::new(path.clone()).unwrap();
        assert_eq!(
            store.providers().insights_url,
            ProviderSettings::default().insights_url
        );

        let _ = fs::remove_file(path);
    }
}
