//! Watch command implementation.

use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;

use colored::*;
use speaker_link_core::{Connectivity, Coordinator, Device};

use crate::cli::WatchArgs;
use crate::context::AppContext;
use crate::error::CliError;
use crate::output::{get_formatter, OutputFormatter};

/// Run the watch command
pub async fn run_watch(args: WatchArgs, ctx: AppContext, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);
    let interval = args
        .interval
        .map(Duration::from_secs)
        .unwrap_or_else(|| ctx.settings.poll_interval());
    if interval.is_zero() {
        return Err(CliError::InvalidArgument(
            "Interval must be at least 1 second".to_string(),
        ));
    }

    if !json {
        println!("Watching {} (press Ctrl+C to stop)...\n", ctx.settings.base_url);
    }

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    watch_loop(&ctx.coordinator, interval, shutdown, |devices, connectivity| {
        render(formatter.as_ref(), devices, connectivity, json)
    })
    .await;

    Ok(())
}

/// Refresh every `interval` and call `on_change` when the directory or
/// connectivity differs from the last render, until `shutdown` completes.
///
/// `shutdown` is polled for the whole run, including while a refresh is in
/// flight.
async fn watch_loop<S, F>(
    coordinator: &Coordinator,
    interval: Duration,
    shutdown: S,
    mut on_change: F,
) where
    S: Future<Output = ()>,
    F: FnMut(&[Device], &Connectivity),
{
    tokio::pin!(shutdown);
    let mut ticker = tokio::time::interval(interval);
    let mut last: Option<(Vec<Device>, Connectivity)> = None;

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                tokio::select! {
                    _ = &mut shutdown => break,
                    // Failures only change connectivity; the last devices stay visible.
                    _ = coordinator.refresh_directory() => {}
                }

                let view = coordinator.view().await;
                let current = (view.devices, view.connectivity);
                if last.as_ref() != Some(&current) {
                    on_change(&current.0, &current.1);
                    last = Some(current);
                }
            }
        }
    }
}

fn render(
    formatter: &dyn OutputFormatter,
    devices: &[Device],
    connectivity: &Connectivity,
    json: bool,
) {
    if json {
        println!("{}", formatter.format_devices(devices, &[]));
    } else {
        print!("\x1B[2J\x1B[1;1H");
        println!("{}", "Speaker Link Watch".bold());
        println!("{}", "Press Ctrl+C to stop".dimmed());
        println!("{}", formatter.format_connectivity(connectivity));
        println!();
        println!("{}", formatter.format_devices(devices, &[]));
    }
    io::stdout().flush().ok();
}
