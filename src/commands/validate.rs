//! Validate command implementation
//!
//! Loads the configuration and prints a summary of what it resolves to.
//! Reaching this point at all means validation passed; load errors are
//! reported by the caller.

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, ConfigSummary};
use crate::config::Config;
use crate::error::Result;

/// Execute the validate command
pub fn run_validate(source: &str, config: &Config, format: OutputFormat) -> Result<()> {
    let mut channels = Vec::new();
    if config.channels.email.is_some() {
        channels.push("email".to_string());
    }
    if config.channels.sms.is_some() {
        channels.push("sms".to_string());
    }
    if config.channels.voice.is_some() {
        channels.push("voice".to_string());
    }

    let summary = ConfigSummary {
        source: source.to_string(),
        checks: config.checks.len(),
        command_checks: config
            .checks
            .values()
            .filter(|c| c.command.is_some())
            .count(),
        groups: config.directory.group_count(),
        alertees: config.directory.alertee_count(),
        state_dir: config.state_dir.display().to_string(),
        channels,
    };

    print_output(&summary, format)?;

    Ok(())
}
