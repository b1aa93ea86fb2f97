//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Speaker Link CLI - list, group and ungroup networked speakers
#[derive(Parser, Debug)]
#[command(name = "speaker-link")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend base URL (overrides the settings file)
    #[arg(long, global = true, env = "SPEAKER_LINK_URL")]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, global = true, env = "SPEAKER_LINK_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Delay before re-fetching the directory after a command, in milliseconds
    #[arg(long, global = true)]
    pub reconcile_delay: Option<u64>,

    /// Directory holding settings.json
    #[arg(long, global = true, env = "SPEAKER_LINK_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List speakers known to the backend
    Speakers(SpeakersArgs),

    /// Add a speaker by IP address
    Add(AddArgs),

    /// Group two or more speakers
    Group(GroupArgs),

    /// Dissolve a group, or all groups
    Ungroup(UngroupArgs),

    /// Check whether the backend is reachable
    Status,

    /// Refresh the directory periodically and show changes
    Watch(WatchArgs),

    /// Interactive session with selection and grouping
    Shell,

    /// Client settings management
    Config(ConfigArgs),
}

// ==================== Speakers ====================

#[derive(Args, Debug)]
pub struct SpeakersArgs {
    /// Show groups instead of individual speakers
    #[arg(short, long)]
    pub groups: bool,
}

// ==================== Add ====================

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Speaker IP address (e.g. 192.168.1.100)
    pub ip: String,

    /// Display name passed to the backend
    #[arg(short, long)]
    pub name: Option<String>,
}

// ==================== Group ====================

#[derive(Args, Debug)]
pub struct GroupArgs {
    /// Names of the speakers to group
    pub speakers: Vec<String>,

    /// Group name (the backend may choose one when empty)
    #[arg(short, long, default_value = "")]
    pub name: String,
}

// ==================== Ungroup ====================

#[derive(Args, Debug)]
pub struct UngroupArgs {
    /// Group to dissolve
    #[arg(conflicts_with = "all")]
    pub group: Option<String>,

    /// Dissolve all groups
    #[arg(long)]
    pub all: bool,
}

// ==================== Watch ====================

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Refresh interval in seconds (defaults to the settings file)
    #[arg(short, long)]
    pub interval: Option<u64>,
}

// ==================== Config ====================

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,

    /// Update the settings file
    Set(ConfigSetArgs),

    /// Print the settings file location
    Path,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigSetArgs {
    /// Backend base URL
    #[arg(long = "url")]
    pub url: Option<String>,

    /// Reconciliation delay in milliseconds
    #[arg(long)]
    pub reconcile_delay_ms: Option<u64>,

    /// Request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Watch refresh interval in seconds
    #[arg(long)]
    pub poll_interval_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_group() {
        let cli = Cli::try_parse_from([
            "speaker-link",
            "group",
            "Kitchen",
            "Living Room",
            "--name",
            "Downstairs",
        ])
        .unwrap();

        match cli.command {
            Commands::Group(args) => {
                assert_eq!(args.speakers, vec!["Kitchen", "Living Room"]);
                assert_eq!(args.name, "Downstairs");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_ungroup_all_conflicts_with_name() {
        assert!(Cli::try_parse_from(["speaker-link", "ungroup", "Upstairs", "--all"]).is_err());

        let cli = Cli::try_parse_from(["speaker-link", "ungroup", "--all"]).unwrap();
        assert!(matches!(cli.command, Commands::Ungroup(UngroupArgs { all: true, group: None })));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "speaker-link",
            "speakers",
            "--json",
            "--base-url",
            "http://10.0.0.2:8888",
            "--reconcile-delay",
            "250",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.base_url.as_deref(), Some("http://10.0.0.2:8888"));
        assert_eq!(cli.reconcile_delay, Some(250));
    }

    #[test]
    fn test_add_requires_ip() {
        assert!(Cli::try_parse_from(["speaker-link", "add"]).is_err());
        let cli = Cli::try_parse_from(["speaker-link", "add", "10.0.0.4", "-n", "Den"]).unwrap();
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.ip, "10.0.0.4");
                assert_eq!(args.name.as_deref(), Some("Den"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
