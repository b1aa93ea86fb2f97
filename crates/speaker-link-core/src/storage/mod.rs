//! Persistent client settings.

pub mod settings;

pub use settings::{ClientSettings, SettingsStorage};

/// Get the default data directory for Speaker Link.
///
/// Uses the `directories` crate to find the appropriate platform-specific
/// data directory.
pub fn default_data_dir() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("", "speaker-link", "speaker-link")
        .map(|dirs| dirs.data_dir().to_path_buf())
}
