//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Threshold-based health check alerting
///
/// Runs configured checks, tracks pass/fail history per check, and
/// notifies alert groups over email, SMS, and voice.
#[derive(Parser, Debug)]
#[command(name = "alerter")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "ALERTER_CONFIG")]
    pub config: Option<String>,

    /// Directory holding per-check event logs
    #[arg(long, global = true, value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    /// Dry run mode - log deliveries instead of sending them
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run all configured checks once
    Run,

    /// Load and validate the configuration
    Validate,

    /// Show per-check event log state
    Status,

    /// Reset one check's event log
    Clear {
        /// Check name as configured
        check: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_run() {
        let args = Cli::try_parse_from(["alerter", "run"]).unwrap();
        assert!(matches!(args.command, Commands::Run));
        assert!(!args.dry_run);
    }

    #[test]
    fn test_cli_parse_verbose() {
        let args = Cli::try_parse_from(["alerter", "-v", "run"]).unwrap();
        assert!(args.verbose);
    }

    #[test]
    fn test_cli_parse_config_path() {
        let args = Cli::try_parse_from(["alerter", "--config", "/etc/alerter/prod.toml", "validate"])
            .unwrap();
        assert_eq!(args.config.as_deref(), Some("/etc/alerter/prod.toml"));
    }

    #[test]
    fn test_cli_parse_state_dir() {
        let args = Cli::try_parse_from(["alerter", "--state-dir", "/var/lib/alerter", "status"])
            .unwrap();
        assert_eq!(args.state_dir, Some(PathBuf::from("/var/lib/alerter")));
    }

    #[test]
    fn test_cli_parse_clear_requires_check() {
        let args = Cli::try_parse_from(["alerter", "clear", "database"]).unwrap();
        if let Commands::Clear { check } = args.command {
            assert_eq!(check, "database");
        } else {
            panic!("Expected Clear command");
        }

        let result = Cli::try_parse_from(["alerter", "clear"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_dry_run_after_subcommand() {
        let args = Cli::try_parse_from(["alerter", "run", "--dry-run"]).unwrap();
        assert!(args.dry_run);
    }

    #[test]
    fn test_cli_parse_format() {
        let args = Cli::try_parse_from(["alerter", "--format", "json", "status"]).unwrap();
        assert!(matches!(args.format, OutputFormat::Json));
    }
}
