//! Command implementations.

pub mod add;
pub mod config;
pub mod group;
pub mod shell;
pub mod speakers;
pub mod status;
pub mod ungroup;
pub mod watch;

pub use add::run_add;
pub use config::run_config;
pub use group::run_group;
pub use shell::run_shell;
pub use speakers::run_speakers;
pub use status::run_status;
pub use ungroup::run_ungroup;
pub use watch::run_watch;

use speaker_link_core::coordinator::{CommandReport, Coordinator};

use crate::error::CliError;
use crate::output::OutputFormatter;

/// Print a command report, wait for its reconciliation refresh, and turn a
/// failed outcome into the matching CLI error.
pub(crate) async fn finish_report(
    report: CommandReport,
    formatter: &dyn OutputFormatter,
) -> Result<(), CliError> {
    let command = report.command;
    if report.is_success() {
        println!("{}", formatter.format_report(&report));
    }

    report
        .reconciled()
        .await
        .map(|_| ())
        .map_err(|error| CliError::Command { command, error })
}

/// Refresh before a command that names speakers.
pub(crate) async fn refresh_or_fail(coordinator: &Coordinator) -> Result<usize, CliError> {
    coordinator
        .refresh_directory()
        .await
        .map_err(CliError::Refresh)
}
