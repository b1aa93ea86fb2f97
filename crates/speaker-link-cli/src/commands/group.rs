//! Group command implementation.

use crate::cli::GroupArgs;
use crate::commands::{finish_report, refresh_or_fail};
use crate::context::AppContext;
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the group command
pub async fn run_group(args: GroupArgs, ctx: AppContext, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);
    let coordinator = &ctx.coordinator;

    refresh_or_fail(coordinator).await?;

    let known = coordinator.devices().await;
    let unknown: Vec<&str> = args
        .speakers
        .iter()
        .filter(|name| !known.iter().any(|d| &d.name == *name))
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        return Err(CliError::InvalidArgument(format!(
            "Unknown speaker(s): {}",
            unknown.join(", ")
        )));
    }

    for name in &args.speakers {
        if !coordinator.selection().await.contains(name) {
            coordinator.toggle(name).await;
        }
    }

    let report = coordinator.create_group_from_selection(&args.name).await;
    finish_report(report, formatter.as_ref()).await?;

    if !json {
        println!("{}", formatter.format_groups(&coordinator.groups().await));
    }

    Ok(())
}
