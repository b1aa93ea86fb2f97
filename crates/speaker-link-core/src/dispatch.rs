//! Action dispatch table.
//!
//! Front ends translate user input into an [`Action`] and hand it to
//! [`dispatch`]; they never call into backend state directly.

use std::str::FromStr;

use crate::coordinator::{CommandReport, Coordinator};
use crate::error::CommandError;
use crate::model::GroupSelector;

/// A user action that the coordinator can perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Refresh,
    Toggle(String),
    ClearSelection,
    AddDevice {
        address: String,
        name: Option<String>,
    },
    CreateGroup {
        name: String,
    },
    DissolveGroup(Option<GroupSelector>),
    ProbeStatus,
}

/// Action identifiers accepted by [`Action::from_str`].
pub const ACTION_IDS: &[(&str, &str)] = &[
    ("refresh", "refresh"),
    ("toggle", "toggle <speaker name>"),
    ("clear", "clear"),
    ("add", "add <ip> [display name]"),
    ("group", "group [group name]"),
    ("ungroup", "ungroup <group name | all>"),
    ("status", "status"),
];

/// Error from parsing an action line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionParseError {
    #[error("Unknown action '{0}'")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

fn usage(id: &str) -> &'static str {
    ACTION_IDS
        .iter()
        .find(|(action, _)| *action == id)
        .map(|(_, usage)| *usage)
        .unwrap_or("")
}

impl FromStr for Action {
    type Err = ActionParseError;

    /// Parse `<id> [argument...]`; the rest of the line is one argument
    /// except for `add`, whose first word is the address.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (id, rest) = match line.split_once(char::is_whitespace) {
            Some((id, rest)) => (id, rest.trim()),
            None => (line, ""),
        };

        match id.to_lowercase().as_str() {
            "refresh" => Ok(Action::Refresh),
            "toggle" if !rest.is_empty() => Ok(Action::Toggle(rest.to_string())),
            "toggle" => Err(ActionParseError::Usage(usage("toggle"))),
            "clear" => Ok(Action::ClearSelection),
            "add" => {
                let (address, name) = match rest.split_once(char::is_whitespace) {
                    Some((address, name)) => (address, Some(name.trim().to_string())),
                    None => (rest, None),
                };
                if address.is_empty() {
                    return Err(ActionParseError::Usage(usage("add")));
                }
                Ok(Action::AddDevice {
                    address: address.to_string(),
                    name: name.filter(|n| !n.is_empty()),
                })
            }
            "group" => Ok(Action::CreateGroup {
                name: rest.to_string(),
            }),
            "ungroup" => Ok(Action::DissolveGroup(GroupSelector::parse(rest))),
            "status" => Ok(Action::ProbeStatus),
            other => Err(ActionParseError::Unknown(other.to_string())),
        }
    }
}

/// What happened when an action ran.
#[derive(Debug)]
pub enum ActionResult {
    Refreshed(Result<usize, CommandError>),
    Toggled { name: String, selected: bool },
    SelectionCleared,
    Command(CommandReport),
}

/// Route `action` to the coordinator method that implements it.
pub async fn dispatch(coordinator: &Coordinator, action: Action) -> ActionResult {
    match action {
        Action::Refresh => ActionResult::Refreshed(coordinator.refresh_directory().await),
        Action::Toggle(name) => {
            let selected = coordinator.toggle(&name).await;
            ActionResult::Toggled { name, selected }
        }
        Action::ClearSelection => {
            coordinator.clear_selection().await;
            ActionResult::SelectionCleared
        }
        Action::AddDevice { address, name } => ActionResult::Command(
            coordinator.add_device(&address, name.as_deref()).await,
        ),
        Action::CreateGroup { name } => {
            ActionResult::Command(coordinator.create_group_from_selection(&name).await)
        }
        Action::DissolveGroup(selector) => {
            ActionResult::Command(coordinator.dissolve_group(selector).await)
        }
        Action::ProbeStatus => ActionResult::Command(coordinator.probe_status().await),
    }
}
