use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sntrack_platform::SleepAction;

use crate::data::ReportFilter;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Runs automatically when the system enters sleep
    Pre {
        /// Sleep action passed by systemd-suspend.service
        #[arg(value_parser = parse_sleep_action)]
        sleep_action: SleepAction,
    },

    /// Runs automatically when the system exits sleep
    Post {
        /// Sleep action passed by systemd-suspend.service
        #[arg(value_parser = parse_sleep_action)]
        sleep_action: SleepAction,
    },

    /// Plot historical data
    Plot {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List recorded sessions that pass the filters
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print sensor readings and paths in use
    Debug,

    /// Show or reset configuration
    Config {
        /// Print config file path
        #[arg(long)]
        path: bool,

        /// Reset config to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct FilterArgs {
    /// Include short sleep sessions (see `short_session_secs`, 300 s by default)
    #[arg(short, long)]
    pub short: bool,

    /// Filter by BIOS version, e.g. "R1BET66W(1.35 )"
    #[arg(short, long)]
    pub bios: Option<String>,

    /// Filter by sleep mode: deep, s2idle
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Filter by sleep action: suspend, hibernate, hybrid-sleep, suspend-then-hibernate
    #[arg(short, long)]
    pub action: Option<String>,
}

impl From<FilterArgs> for ReportFilter {
    fn from(args: FilterArgs) -> Self {
        ReportFilter {
            bios: args.bios,
            mode: args.mode,
            action: args.action,
            include_short: args.short,
        }
    }
}

/// Tracks the battery discharge rate during sleep
#[derive(Debug, Parser)]
#[command(name = "sntrack", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

fn parse_sleep_action(s: &str) -> Result<SleepAction, String> {
    s.parse().map_err(|e: sntrack_platform::ParseSleepActionError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_pre_hook() {
        let cli = Cli::try_parse_from(["sntrack", "pre", "suspend-then-hibernate"]).unwrap();
        assert!(!cli.verbose);
        match cli.command {
            Commands::Pre { sleep_action } => {
                assert_eq!(sleep_action, SleepAction::SuspendThenHibernate)
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_sleep_action() {
        assert!(Cli::try_parse_from(["sntrack", "post", "nap"]).is_err());
        assert!(Cli::try_parse_from(["sntrack", "post"]).is_err());
    }

    #[test]
    fn test_parse_plot_filters() {
        let cli = Cli::try_parse_from([
            "sntrack", "-v", "plot", "--short", "-b", "1.35", "--mode", "deep", "-a", "suspend",
        ])
        .unwrap();
        assert!(cli.verbose);

        let Commands::Plot { filter } = cli.command else {
            panic!("expected plot command");
        };
        assert_eq!(
            ReportFilter::from(filter),
            ReportFilter {
                bios: Some("1.35".to_string()),
                mode: Some("deep".to_string()),
                action: Some("suspend".to_string()),
                include_short: true,
            }
        );
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["sntrack"]).is_err());
    }
}
