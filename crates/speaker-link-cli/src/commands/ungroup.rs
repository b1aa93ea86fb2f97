//! Ungroup command implementation.

use speaker_link_core::GroupSelector;

use crate::cli::UngroupArgs;
use crate::commands::finish_report;
use crate::context::AppContext;
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the ungroup command
pub async fn run_ungroup(args: UngroupArgs, ctx: AppContext, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);

    let selector = if args.all {
        Some(GroupSelector::All)
    } else {
        args.group.map(GroupSelector::Named)
    };

    let report = ctx.coordinator.dissolve_group(selector).await;
    finish_report(report, formatter.as_ref()).await?;

    if !json {
        println!("{}", formatter.format_groups(&ctx.coordinator.groups().await));
    }

    Ok(())
}
