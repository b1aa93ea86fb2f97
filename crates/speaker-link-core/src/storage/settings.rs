//! Settings storage service.
//!
//! A single JSON file holding the backend URL and timing knobs.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::SettingsError;

const SETTINGS_FILE: &str = "settings.json";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8888";
pub const DEFAULT_RECONCILE_DELAY_MS: u64 = 1000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Client settings. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientSettings {
    /// Backend base URL
    pub base_url: String,
    /// Wait before re-fetching the directory after a command
    pub reconcile_delay_ms: u64,
    /// Per-request HTTP timeout
    pub request_timeout_ms: u64,
    /// Refresh period for watch mode
    pub poll_interval_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            reconcile_delay_ms: DEFAULT_RECONCILE_DELAY_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl ClientSettings {
    pub fn reconcile_delay(&self) -> Duration {
        Duration::from_millis(self.reconcile_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let url = Url::parse(&self.base_url).map_err(|e| SettingsError::Invalid {
            field: "baseUrl",
            message: format!("'{}': {}", self.base_url, e),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SettingsError::Invalid {
                field: "baseUrl",
                message: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        if self.request_timeout_ms == 0 {
            return Err(SettingsError::Invalid {
                field: "requestTimeoutMs",
                message: "must be greater than zero".to_string(),
            });
        }

        if self.poll_interval_secs == 0 {
            return Err(SettingsError::Invalid {
                field: "pollIntervalSecs",
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

/// Settings storage service.
///
/// Takes a `PathBuf` in the constructor so callers (CLI, tests) choose where
/// the file lives.
pub struct SettingsStorage {
    dir: PathBuf,
}

impl SettingsStorage {
    /// Create a new SettingsStorage rooted at `dir`, creating it if needed.
    pub fn new(dir: PathBuf) -> Result<Self, SettingsError> {
        std::fs::create_dir_all(&dir)
            .map_err(|e| SettingsError::DirectoryAccess(format!("{}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load settings, falling back to defaults when no file exists yet.
    pub async fn load(&self) -> Result<ClientSettings, SettingsError> {
        let path = self.path();

        if !path.exists() {
            return Ok(ClientSettings::default());
        }

        let content = fs::read_to_string(&path).await?;
        let settings: ClientSettings = serde_json::from_str(&content)?;
        settings.validate()?;

        Ok(settings)
    }

    /// Validate and save settings.
    pub async fn save(&self, settings: &ClientSettings) -> Result<(), SettingsError> {
        settings.validate()?;

        let content = serde_json::to_string_pretty(settings)?;
        fs::write(self.path(), content).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_storage() -> (SettingsStorage, tempfile::TempDir) {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = SettingsStorage::new(temp_dir.path().join("nested")).unwrap();
        (storage, temp_dir)
    }

    #[tokio::test]
    async fn test_load_defaults_when_missing() {
        let (storage, _tmp) = create_test_storage();
        let settings = storage.load().await.unwrap();
        assert_eq!(settings, ClientSettings::default());
        assert_eq!(settings.reconcile_delay(), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let (storage, _tmp) = create_test_storage();
        let settings = ClientSettings {
            base_url: "http://192.168.1.10:8888".to_string(),
            reconcile_delay_ms: 250,
            ..ClientSettings::default()
        };

        storage.save(&settings).await.unwrap();
        assert!(storage.path().exists());

        let loaded = storage.load().await.unwrap();
        assert_eq!(loaded, settings);
    }

    #[tokio::test]
    async fn test_partial_file_uses_defaults() {
        let (storage, _tmp) = create_test_storage();
        std::fs::write(storage.path(), r#"{"baseUrl":"https://speakers.lan"}"#).unwrap();

        let loaded = storage.load().await.unwrap();
        assert_eq!(loaded.base_url, "https://speakers.lan");
        assert_eq!(loaded.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
    }

    #[tokio::test]
    async fn test_invalid_settings_rejected() {
        let (storage, _tmp) = create_test_storage();

        let bad_url = ClientSettings {
            base_url: "localhost".to_string(),
            ..ClientSettings::default()
        };
        assert!(matches!(
            storage.save(&bad_url).await,
            Err(SettingsError::Invalid { field: "baseUrl", .. })
        ));

        let zero_timeout = ClientSettings {
            request_timeout_ms: 0,
            ..ClientSettings::default()
        };
        assert!(zero_timeout.validate().is_err());

        std::fs::write(storage.path(), "{not json").unwrap();
        assert!(matches!(
            storage.load().await,
            Err(SettingsError::Serialization(_))
        ));
    }
}
