//! Error types for the Speaker Link CLI.
//!
//! CliError wraps errors from the core library and adds CLI-specific variants.

use speaker_link_core::coordinator::CommandKind;
use speaker_link_core::error::{CommandError, CoreError, SettingsError};
use thiserror::Error;

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NETWORK_ERROR: i32 = 2;
    pub const REJECTED: i32 = 3;
    pub const INVALID_ARGS: i32 = 4;
    pub const PROTOCOL_ERROR: i32 = 5;
}

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("{}", failure_text(.command, .error))]
    Command {
        command: CommandKind,
        error: CommandError,
    },

    #[error("Directory refresh failed: {0}")]
    Refresh(CommandError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Other(String),
}

fn failure_text(command: &CommandKind, error: &CommandError) -> String {
    match error {
        CommandError::Validation(e) => e.to_string(),
        other => format!("{}: {}", command.response_label(), other),
    }
}

fn command_exit_code(error: &CommandError) -> i32 {
    match error {
        CommandError::Validation(_) => exit_codes::INVALID_ARGS,
        CommandError::Unreachable(_) => exit_codes::NETWORK_ERROR,
        CommandError::Rejected { .. } => exit_codes::REJECTED,
        CommandError::Protocol(_) => exit_codes::PROTOCOL_ERROR,
    }
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(e) => match e {
                CoreError::Command(ce) => command_exit_code(ce),
                CoreError::Settings(SettingsError::Invalid { .. }) => exit_codes::INVALID_ARGS,
                CoreError::Settings(_) => exit_codes::GENERAL_ERROR,
                CoreError::Io(_) => exit_codes::GENERAL_ERROR,
                CoreError::Other(_) => exit_codes::GENERAL_ERROR,
            },
            CliError::Command { error, .. } | CliError::Refresh(error) => command_exit_code(error),
            CliError::Io(_) => exit_codes::GENERAL_ERROR,
            CliError::InvalidArgument(_) => exit_codes::INVALID_ARGS,
            CliError::Other(_) => exit_codes::GENERAL_ERROR,
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(e: SettingsError) -> Self {
        CliError::Core(CoreError::Settings(e))
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
