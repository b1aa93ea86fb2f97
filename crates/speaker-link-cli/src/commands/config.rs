//! Settings management commands.

use crate::cli::{Cli, ConfigArgs, ConfigCommands, ConfigSetArgs};
use crate::context::{effective_settings, open_storage};
use crate::error::CliError;
use crate::output::get_formatter;

use speaker_link_core::storage::ClientSettings;

/// Run the config command
pub async fn run_config(args: ConfigArgs, cli: &Cli) -> Result<(), CliError> {
    let formatter = get_formatter(cli.json);
    let storage = open_storage(cli)?;

    match args.command {
        ConfigCommands::Show => {
            let settings = effective_settings(cli, &storage).await?;
            println!("{}", formatter.format_settings(&settings, &storage.path()));
        }
        ConfigCommands::Set(set) => {
            let mut settings = storage.load().await?;
            if !apply_set(&mut settings, set) {
                return Err(CliError::InvalidArgument(
                    "Nothing to set; pass at least one option".to_string(),
                ));
            }
            storage.save(&settings).await?;
            println!("{}", formatter.format_settings(&settings, &storage.path()));
        }
        ConfigCommands::Path => {
            println!("{}", storage.path().display());
        }
    }

    Ok(())
}

/// Apply provided options; returns whether anything was given.
fn apply_set(settings: &mut ClientSettings, set: ConfigSetArgs) -> bool {
    let mut changed = false;

    if let Some(url) = set.url {
        settings.base_url = url;
        changed = true;
    }
    if let Some(delay) = set.reconcile_delay_ms {
        settings.reconcile_delay_ms = delay;
        changed = true;
    }
    if let Some(timeout) = set.timeout_ms {
        settings.request_timeout_ms = timeout;
        changed = true;
    }
    if let Some(interval) = set.poll_interval_secs {
        settings.poll_interval_secs = interval;
        changed = true;
    }

    changed
}
