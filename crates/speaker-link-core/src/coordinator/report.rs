//! Command reports and session events.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::error::{CommandError, FailureKind};
use crate::model::{Connectivity, Device, GroupSummary};

/// Which user command produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    AddDevice,
    CreateGroup,
    DissolveGroup,
    ProbeStatus,
}

impl CommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::AddDevice => "add_device",
            CommandKind::CreateGroup => "create_group",
            CommandKind::DissolveGroup => "dissolve_group",
            CommandKind::ProbeStatus => "probe_status",
        }
    }

    /// Prefix used when showing the backend's response to the user.
    pub fn response_label(&self) -> &'static str {
        match self {
            CommandKind::AddDevice => "Add speaker response",
            CommandKind::CreateGroup => "Group creation response",
            CommandKind::DissolveGroup => "Ungroup response",
            CommandKind::ProbeStatus => "Status",
        }
    }
}

/// Result of one command, plus the reconciliation refresh it scheduled.
#[derive(Debug)]
pub struct CommandReport {
    pub command: CommandKind,
    pub outcome: Result<String, CommandError>,
    pub(crate) reconcile: Option<JoinHandle<()>>,
}

impl CommandReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Classification of a failure, `None` on success.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.outcome.as_ref().err().map(CommandError::kind)
    }

    /// The message to show, success or not.
    pub fn message(&self) -> String {
        match &self.outcome {
            Ok(msg) => msg.clone(),
            Err(e) => e.message(),
        }
    }

    /// Whether a reconciliation refresh was scheduled.
    pub fn reconcile_scheduled(&self) -> bool {
        self.reconcile.is_some()
    }

    /// Wait for the scheduled refresh, if any, and return the outcome.
    ///
    /// Dropping the report instead leaves the refresh running in the
    /// background.
    pub async fn reconciled(mut self) -> Result<String, CommandError> {
        if let Some(handle) = self.reconcile.take() {
            // A panicked refresh task leaves state untouched; nothing to add.
            let _ = handle.await;
        }
        self.outcome
    }
}

/// Notifications for rendering layers.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    DirectoryReplaced { count: usize },
    ConnectivityChanged(Connectivity),
    CommandFinished {
        command: CommandKind,
        outcome: Result<String, CommandError>,
    },
}

/// Read-only copy of the session for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub devices: Vec<Device>,
    pub groups: Vec<GroupSummary>,
    pub selection: Vec<String>,
    pub connectivity: Connectivity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refreshed_at: Option<DateTime<Utc>>,
}
