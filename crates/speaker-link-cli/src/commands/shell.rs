//! Interactive shell.
//!
//! Reads one action per line and routes it through the core dispatch table.
//! Reconciliation refreshes run in the background and are announced as they
//! land.

use std::io::Write;

use colored::*;
use speaker_link_core::coordinator::SessionEvent;
use speaker_link_core::dispatch::{dispatch, Action, ActionResult, ACTION_IDS};
use speaker_link_core::Coordinator;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use crate::context::AppContext;
use crate::error::CliError;
use crate::output::{get_formatter, OutputFormatter};

/// Views handled by the shell itself
const LOCAL_COMMANDS: &[(&str, &str)] = &[
    ("list", "show speakers"),
    ("groups", "show groups"),
    ("selection", "show selected speakers"),
    ("help", "show this help"),
    ("quit", "leave the shell"),
];

/// Run the interactive shell
pub async fn run_shell(ctx: AppContext, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);
    let coordinator = ctx.coordinator;

    if !json {
        println!("{}", "Speaker Link shell".bold());
        println!("{}", format!("Backend: {}", ctx.settings.base_url).dimmed());
        println!("{}", "Type 'help' for commands.".dimmed());
    }

    let notifier = spawn_notifier(&coordinator, json);

    // Probe first, then load speakers.
    coordinator.probe_status().await;
    println!(
        "{}",
        formatter.format_connectivity(&coordinator.connectivity().await)
    );
    if coordinator.refresh_directory().await.is_ok() {
        let view = coordinator.view().await;
        println!("{}", formatter.format_devices(&view.devices, &view.selection));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(json);
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "quit" | "exit" => break,
            "help" => println!("{}", help_text()),
            "list" => {
                let view = coordinator.view().await;
                println!("{}", formatter.format_devices(&view.devices, &view.selection));
            }
            "groups" => println!("{}", formatter.format_groups(&coordinator.groups().await)),
            "selection" => println!(
                "{}",
                formatter.format_selection(&coordinator.selection().await)
            ),
            _ => match line.parse::<Action>() {
                Ok(action) => {
                    let result = dispatch(&coordinator, action).await;
                    render(formatter.as_ref(), &coordinator, result).await;
                }
                Err(e) => println!("{}", formatter.format_message(&e.to_string())),
            },
        }
    }

    notifier.abort();
    Ok(())
}

async fn render(formatter: &dyn OutputFormatter, coordinator: &Coordinator, result: ActionResult) {
    match result {
        ActionResult::Refreshed(Ok(_)) => {
            let view = coordinator.view().await;
            println!("{}", formatter.format_devices(&view.devices, &view.selection));
        }
        ActionResult::Refreshed(Err(e)) => {
            println!("{}", formatter.format_message(&format!("Error loading speakers: {}", e)));
        }
        ActionResult::Toggled { name, selected } => {
            let verb = if selected { "Selected" } else { "Deselected" };
            println!("{}", formatter.format_message(&format!("{} {}", verb, name)));
        }
        ActionResult::SelectionCleared => {
            println!("{}", formatter.format_message("Selection cleared"));
        }
        // Dropping the report leaves its reconciliation running; the notifier
        // announces the refreshed directory.
        ActionResult::Command(report) => println!("{}", formatter.format_report(&report)),
    }
}

fn spawn_notifier(coordinator: &Coordinator, json: bool) -> tokio::task::JoinHandle<()> {
    let mut events = coordinator.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(SessionEvent::DirectoryReplaced { count }) if !json => {
                    println!("{}", format!("[directory updated: {} speaker(s)]", count).dimmed());
                }
                Ok(SessionEvent::ConnectivityChanged(connectivity)) if !json => {
                    println!("{}", format!("[{}]", connectivity.label()).dimmed());
                }
                Ok(_) => {}
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    })
}

fn prompt(json: bool) {
    if !json {
        print!("{} ", ">".bold());
        std::io::stdout().flush().ok();
    }
}

fn help_text() -> String {
    let mut lines = vec!["Actions:".to_string()];
    for (_, usage) in ACTION_IDS {
        lines.push(format!("  {}", usage));
    }
    lines.push("Views:".to_string());
    for (name, description) in LOCAL_COMMANDS {
        lines.push(format!("  {:<10} {}", name, description));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_actions_and_views() {
        let help = help_text();
        assert!(help.contains("toggle <speaker name>"));
        assert!(help.contains("ungroup <group name | all>"));
        assert!(help.contains("selection"));
    }
}
