//! Status command implementation
//!
//! Shows the event log state of every configured check.

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, CheckStatusEntry, StatusReport};
use crate::config::Config;
use crate::domain::{format_ts, leading_failures, trailing_successes};
use crate::error::Result;
use crate::store::{EventStore, FileStore};

/// Execute the status command
pub fn run_status(config: &Config, format: OutputFormat) -> Result<()> {
    let store = FileStore::new(&config.state_dir)?;

    let mut checks = Vec::with_capacity(config.checks.len());
    for check in config.checks.keys() {
        let events = store.read_all(check)?;
        let failing = events.last().map_or(false, |event| !event.passed());
        let streak = if failing {
            leading_failures(&events)
        } else {
            trailing_successes(&events)
        };

        checks.push(CheckStatusEntry {
            check: check.to_string(),
            events: events.len(),
            failing,
            streak,
            last_event: events.last().map(|event| format_ts(event.ts)),
        });
    }

    let report = StatusReport {
        state_dir: config.state_dir.display().to_string(),
        checks,
    };
    print_output(&report, format)?;

    Ok(())
}
