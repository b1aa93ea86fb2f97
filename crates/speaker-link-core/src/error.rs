//! Error types for Speaker Link core.

use serde::Serialize;
use thiserror::Error;

/// Core error type for shared operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Local precondition failures. These never cause a network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid IP address: '{0}' (expected four octets 0-255, e.g. 192.168.1.100)")]
    InvalidAddress(String),

    #[error("You need at least 2 speakers to create a group ({selected} selected)")]
    InsufficientSelection { selected: usize },

    #[error("Please select a group to ungroup")]
    MissingGroupSelector,

    #[error("{0} is already in progress")]
    ControlBusy(String),
}

/// Coarse classification shared by every command path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Validation,
    Unreachable,
    Rejected,
    Protocol,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Validation => "validation",
            FailureKind::Unreachable => "unreachable",
            FailureKind::Rejected => "rejected",
            FailureKind::Protocol => "protocol",
        }
    }
}

/// Outcome of a failed command or directory refresh.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Server unreachable: {0}")]
    Unreachable(String),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response from server: {0}")]
    Protocol(String),
}

impl CommandError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CommandError::Validation(_) => FailureKind::Validation,
            CommandError::Unreachable(_) => FailureKind::Unreachable,
            CommandError::Rejected { .. } => FailureKind::Rejected,
            CommandError::Protocol(_) => FailureKind::Protocol,
        }
    }

    /// User-facing text without the classification prefix.
    pub fn message(&self) -> String {
        match self {
            CommandError::Validation(e) => e.to_string(),
            CommandError::Unreachable(msg) | CommandError::Protocol(msg) => msg.clone(),
            CommandError::Rejected { message, .. } => message.clone(),
        }
    }
}

impl From<TransportError> for CommandError {
    fn from(e: TransportError) -> Self {
        CommandError::Unreachable(e.to_string())
    }
}

/// Failures below HTTP status level: connect, timeout, broken body stream.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

/// Settings file errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to access settings directory: {0}")]
    DirectoryAccess(String),

    #[error("Invalid setting {field}: {message}")]
    Invalid { field: &'static str, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_displays_backend_message_only() {
        let err = CommandError::Rejected {
            status: 500,
            message: "busy".to_string(),
        };
        assert_eq!(format!("{}", err), "busy");
        assert_eq!(err.kind(), FailureKind::Rejected);
    }

    #[test]
    fn test_validation_error_converts() {
        let err: CommandError = ValidationError::InsufficientSelection { selected: 1 }.into();
        assert_eq!(err.kind(), FailureKind::Validation);
        assert!(err.message().contains("at least 2"));
    }

    #[test]
    fn test_transport_error_is_unreachable() {
        let err: CommandError = TransportError::Timeout {
            url: "http://localhost:8888/speakers".to_string(),
        }
        .into();
        assert_eq!(err.kind(), FailureKind::Unreachable);
        assert!(err.message().contains("timed out"));
    }

    #[test]
    fn test_core_error_from_settings_error() {
        let err = CoreError::Settings(SettingsError::DirectoryAccess("/nope".to_string()));
        assert!(format!("{}", err).contains("settings directory"));
    }
}
