//! Speakers command implementation.

use crate::cli::SpeakersArgs;
use crate::commands::refresh_or_fail;
use crate::context::AppContext;
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the speakers command
pub async fn run_speakers(args: SpeakersArgs, ctx: AppContext, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);

    refresh_or_fail(&ctx.coordinator).await?;
    let view = ctx.coordinator.view().await;

    if args.groups {
        println!("{}", formatter.format_groups(&view.groups));
    } else {
        println!("{}", formatter.format_devices(&view.devices, &view.selection));
    }

    Ok(())
}
