//! Run command implementation
//!
//! Runs every configured check once and reports the pass.

use crate::channel::{CommandMessenger, LogMessenger, Messenger};
use crate::checks::CheckRegistry;
use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, RunReport};
use crate::config::Config;
use crate::error::Result;
use crate::services::CheckRunner;
use crate::store::FileStore;

/// Execute the run command
pub fn run_checks(config: &Config, format: OutputFormat, dry_run: bool) -> Result<()> {
    let registry = CheckRegistry::from_config(config);
    if registry.is_empty() {
        log::warn!("No runnable checks configured");
    }

    let store = FileStore::new(&config.state_dir)?;
    let messenger: Box<dyn Messenger> = if dry_run {
        log::info!("Dry run, deliveries are logged instead of sent");
        Box::new(LogMessenger)
    } else {
        Box::new(CommandMessenger::new(config.channels.clone()))
    };

    let runner = CheckRunner::new(&registry, &store, &config.directory, messenger.as_ref());
    let summary = runner.run_all()?;

    print_output(&RunReport::from(&summary), format)?;

    Ok(())
}
