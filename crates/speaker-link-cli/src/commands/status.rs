//! Status command implementation.

use crate::context::AppContext;
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the status command
pub async fn run_status(ctx: AppContext, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);

    let report = ctx.coordinator.probe_status().await;
    let command = report.command;
    println!(
        "{}",
        formatter.format_connectivity(&ctx.coordinator.connectivity().await)
    );

    report
        .outcome
        .map(|_| ())
        .map_err(|error| CliError::Command { command, error })
}
