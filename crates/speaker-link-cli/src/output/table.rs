//! Table-formatted output for CLI.

use std::path::Path;

use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use speaker_link_core::storage::ClientSettings;
use speaker_link_core::{CommandReport, Connectivity, Device, FailureKind, GroupSummary};

use super::OutputFormatter;

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }

    fn failure_tag(kind: FailureKind) -> ColoredString {
        match kind {
            FailureKind::Validation => "[invalid]".yellow(),
            FailureKind::Unreachable => "[unreachable]".red(),
            FailureKind::Rejected => "[rejected]".red(),
            FailureKind::Protocol => "[protocol]".magenta(),
        }
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableOutput {
    fn format_devices(&self, devices: &[Device], selection: &[String]) -> String {
        if devices.is_empty() {
            return "No speakers found.".to_string();
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Sel", "Name", "IP", "Port", "MAC", "Model", "Group"]);

        for device in devices {
            let selected = selection.contains(&device.name);
            let mark = if selected {
                Cell::new("[x]").fg(Color::Green)
            } else {
                Cell::new("[ ]")
            };

            table.add_row(vec![
                mark,
                Cell::new(&device.name),
                Cell::new(&device.ip),
                Cell::new(device.port.map(|p| p.to_string()).unwrap_or_default()),
                Cell::new(&device.mac),
                Cell::new(device.model.as_deref().unwrap_or("-")),
                match device.group() {
                    Some(group) => Cell::new(group).fg(Color::Cyan),
                    None => Cell::new("-"),
                },
            ]);
        }

        format!("{}\n\nFound {} speaker(s)", table, devices.len())
    }

    fn format_groups(&self, groups: &[GroupSummary]) -> String {
        if groups.is_empty() {
            return "No groups.".to_string();
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Group", "Members"]);

        for group in groups {
            table.add_row(vec![
                Cell::new(&group.name).fg(Color::Cyan),
                Cell::new(group.members.join(", ")),
            ]);
        }

        table.to_string()
    }

    fn format_report(&self, report: &CommandReport) -> String {
        match report.failure_kind() {
            None => format!(
                "{} {}: {}",
                "[OK]".green(),
                report.command.response_label(),
                report.message()
            ),
            Some(kind) => format!(
                "{} {}: {}",
                Self::failure_tag(kind),
                report.command.response_label(),
                report.message()
            ),
        }
    }

    fn format_connectivity(&self, connectivity: &Connectivity) -> String {
        match connectivity {
            Connectivity::Healthy => format!("{} {}", "●".green(), connectivity.label()),
            Connectivity::Unknown => format!("{} {}", "●".dimmed(), connectivity.label()),
            Connectivity::Unhealthy(reason) => {
                format!("{} {} ({})", "●".red(), connectivity.label(), reason)
            }
        }
    }

    fn format_selection(&self, selection: &[String]) -> String {
        if selection.is_empty() {
            "No speakers selected.".to_string()
        } else {
            format!("Selected ({}): {}", selection.len(), selection.join(", "))
        }
    }

    fn format_settings(&self, settings: &ClientSettings, path: &Path) -> String {
        let mut lines = Vec::new();
        lines.push(format!("Settings file:    {}", path.display()));
        lines.push(format!("  Base URL:       {}", settings.base_url));
        lines.push(format!("  Reconcile delay: {} ms", settings.reconcile_delay_ms));
        lines.push(format!("  Request timeout: {} ms", settings.request_timeout_ms));
        lines.push(format!("  Poll interval:  {} s", settings.poll_interval_secs));
        lines.join("\n")
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }
}
