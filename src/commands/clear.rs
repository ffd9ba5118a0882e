//! Clear command implementation
//!
//! Resets one check's event log. Safe to repeat; clearing an absent log
//! is not an error.

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, Message};
use crate::config::Config;
use crate::domain::CheckId;
use crate::error::{AppError, Result};
use crate::store::{EventStore, FileStore};

/// Execute the clear command
pub fn run_clear(config: &Config, check: &str, format: OutputFormat) -> Result<()> {
    let check = CheckId::from(check);
    if !config.checks.contains_key(&check) {
        return Err(AppError::CheckNotFound(check.to_string()));
    }

    let store = FileStore::new(&config.state_dir)?;
    store.reset(&check)?;

    print_output(
        &Message {
            message: format!("Event log for '{}' reset", check),
            success: true,
        },
        format,
    )?;

    Ok(())
}
