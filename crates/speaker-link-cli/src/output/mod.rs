//! Output formatting for CLI results.

pub mod json;
pub mod table;

pub use json::JsonOutput;
pub use table::TableOutput;

use std::path::Path;

use speaker_link_core::storage::ClientSettings;
use speaker_link_core::{CommandReport, Connectivity, Device, GroupSummary};

/// Output formatter trait
pub trait OutputFormatter {
    /// Format the device directory, marking selected names
    fn format_devices(&self, devices: &[Device], selection: &[String]) -> String;

    /// Format groups derived from the directory
    fn format_groups(&self, groups: &[GroupSummary]) -> String;

    /// Format the outcome of a backend command
    fn format_report(&self, report: &CommandReport) -> String;

    /// Format the backend connectivity indicator
    fn format_connectivity(&self, connectivity: &Connectivity) -> String;

    /// Format the current selection
    fn format_selection(&self, selection: &[String]) -> String;

    /// Format effective settings and where they are stored
    fn format_settings(&self, settings: &ClientSettings, path: &Path) -> String;

    /// Format a generic message
    fn format_message(&self, message: &str) -> String;
}

/// Get the appropriate formatter based on JSON flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonOutput::new())
    } else {
        Box::new(TableOutput::new())
    }
}
