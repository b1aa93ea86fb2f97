//! Type definitions shared by the directory, coordinator and CLI.
//!
//! Field names follow the backend's JSON (camelCase).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One controllable speaker as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Unique key within a directory snapshot
    pub name: String,
    /// Network address
    pub ip: String,
    /// Control port
    #[serde(default, deserialize_with = "port_from_number_or_string")]
    pub port: Option<u16>,
    /// Hardware identifier
    #[serde(default)]
    pub mac: String,
    /// Model label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Backend-assigned group, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
}

impl Device {
    pub fn new(name: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip: ip.into(),
            port: None,
            mac: String::new(),
            model: None,
            group_name: None,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group_name = Some(group.into());
        self
    }

    /// Group name, treating an empty string as ungrouped.
    pub fn group(&self) -> Option<&str> {
        self.group_name.as_deref().filter(|g| !g.is_empty())
    }
}

/// Accept a port as a number or numeric string; anything unusable is `None`.
fn port_from_number_or_string<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

/// A backend group, derived from the `groupName` of directory members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub name: String,
    pub members: Vec<String>,
}

/// Target of a dissolve-group command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupSelector {
    /// Dissolve every group
    All,
    /// Dissolve a single named group
    Named(String),
}

impl GroupSelector {
    /// Parse a selector the way the group picker offers it: "all" or a name.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            None
        } else if s.eq_ignore_ascii_case("all") {
            Some(GroupSelector::All)
        } else {
            Some(GroupSelector::Named(s.to_string()))
        }
    }
}

/// Reachability of the backend as last observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum Connectivity {
    Unknown,
    Healthy,
    Unhealthy(String),
}

impl Connectivity {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Connectivity::Healthy)
    }

    /// Short status text for indicators.
    pub fn label(&self) -> &'static str {
        match self {
            Connectivity::Unknown => "Unknown",
            Connectivity::Healthy => "Connected",
            Connectivity::Unhealthy(_) => "Server Unreachable",
        }
    }
}
