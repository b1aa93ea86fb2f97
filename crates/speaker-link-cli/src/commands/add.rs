//! Add command implementation.

use crate::cli::AddArgs;
use crate::commands::finish_report;
use crate::context::AppContext;
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the add command
pub async fn run_add(args: AddArgs, ctx: AppContext, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);

    let report = ctx
        .coordinator
        .add_device(&args.ip, args.name.as_deref())
        .await;
    finish_report(report, formatter.as_ref()).await?;

    if !json {
        let devices = ctx.coordinator.devices().await;
        println!("{}", formatter.format_devices(&devices, &[]));
    }

    Ok(())
}
