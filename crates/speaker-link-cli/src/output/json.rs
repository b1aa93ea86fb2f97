//! JSON-formatted output for CLI.

use std::path::Path;

use serde::Serialize;
use serde_json::{json, Value};

use speaker_link_core::storage::ClientSettings;
use speaker_link_core::{CommandReport, Connectivity, Device, GroupSummary};

use super::OutputFormatter;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format_devices(&self, devices: &[Device], selection: &[String]) -> String {
        let items: Vec<Value> = devices
            .iter()
            .map(|device| {
                let mut value = serde_json::to_value(device).unwrap_or(json!({}));
                if let Value::Object(ref mut map) = value {
                    map.insert(
                        "selected".to_string(),
                        json!(selection.contains(&device.name)),
                    );
                }
                value
            })
            .collect();

        Self::to_json(&json!({
            "speakers": items,
            "count": devices.len()
        }))
    }

    fn format_groups(&self, groups: &[GroupSummary]) -> String {
        Self::to_json(&json!({
            "groups": groups,
            "count": groups.len()
        }))
    }

    fn format_report(&self, report: &CommandReport) -> String {
        Self::to_json(&json!({
            "command": report.command,
            "success": report.is_success(),
            "failure": report.failure_kind(),
            "message": report.message()
        }))
    }

    fn format_connectivity(&self, connectivity: &Connectivity) -> String {
        Self::to_json(&json!({
            "connected": connectivity.is_healthy(),
            "status": connectivity.label(),
            "detail": connectivity
        }))
    }

    fn format_selection(&self, selection: &[String]) -> String {
        Self::to_json(&json!({ "selected": selection }))
    }

    fn format_settings(&self, settings: &ClientSettings, path: &Path) -> String {
        Self::to_json(&json!({
            "path": path.display().to_string(),
            "settings": settings
        }))
    }

    fn format_message(&self, message: &str) -> String {
        Self::to_json(&json!({ "message": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_devices_include_selection_flag() {
        let devices = vec![
            Device::new("Kitchen", "10.0.0.1"),
            Device::new("Den", "10.0.0.2").with_group("Down"),
        ];
        let out = JsonOutput::new().format_devices(&devices, &["Den".to_string()]);
        let value: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["count"], 2);
        assert_eq!(value["speakers"][0]["selected"], false);
        assert_eq!(value["speakers"][1]["selected"], true);
        assert_eq!(value["speakers"][1]["groupName"], "Down");
    }

    #[test]
    fn test_connectivity_json() {
        let out = JsonOutput::new()
            .format_connectivity(&Connectivity::Unhealthy("refused".to_string()));
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["connected"], false);
        assert_eq!(value["detail"]["reason"], "refused");
    }
}
