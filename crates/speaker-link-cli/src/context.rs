//! Settings resolution and coordinator construction.

use std::path::PathBuf;
use std::sync::Arc;

use speaker_link_core::storage::{default_data_dir, ClientSettings, SettingsStorage};
use speaker_link_core::{Coordinator, HttpTransport};
use tracing::debug;

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Open the settings storage selected by `--config-dir` or the platform default.
pub fn open_storage(cli: &Cli) -> Result<SettingsStorage> {
    let dir: PathBuf = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir()
            .ok_or_else(|| CliError::Other("Could not determine data directory".to_string()))?,
    };
    Ok(SettingsStorage::new(dir)?)
}

/// Settings from the file with command-line overrides applied.
pub async fn effective_settings(cli: &Cli, storage: &SettingsStorage) -> Result<ClientSettings> {
    let mut settings = storage.load().await?;
    apply_overrides(cli, &mut settings);
    settings.validate()?;
    Ok(settings)
}

fn apply_overrides(cli: &Cli, settings: &mut ClientSettings) {
    if let Some(url) = &cli.base_url {
        settings.base_url = url.clone();
    }
    if let Some(timeout) = cli.timeout {
        settings.request_timeout_ms = timeout;
    }
    if let Some(delay) = cli.reconcile_delay {
        settings.reconcile_delay_ms = delay;
    }
}

/// Everything a command needs to talk to the backend.
pub struct AppContext {
    pub settings: ClientSettings,
    pub coordinator: Coordinator,
}

impl AppContext {
    pub async fn from_cli(cli: &Cli) -> Result<Self> {
        let storage = open_storage(cli)?;
        let settings = effective_settings(cli, &storage).await?;

        let transport = HttpTransport::new(&settings.base_url, settings.request_timeout())
            .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
        debug!(base_url = %settings.base_url, "using backend");

        let coordinator = Coordinator::new(Arc::new(transport), settings.reconcile_delay());

        Ok(Self {
            settings,
            coordinator,
        })
    }
}
