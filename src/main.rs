//! alerter - threshold-based health check alerting
//!
//! A command-line tool that runs configured checks, records their
//! outcomes, and alerts the right people once failure thresholds are hit.

use clap::Parser;

use alerter::cli::args::{generate_completions, Cli, Commands};
use alerter::commands::{run_checks, run_clear, run_status, run_validate};
use alerter::config::{Config, ConfigBuilder};
use alerter::error::AppError;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging (RUST_LOG overrides the default)
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    // Run the appropriate command
    let result = run(&cli);

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    match &cli.command {
        Commands::Run => run_checks(&load_config(cli)?, cli.format, cli.dry_run),

        Commands::Validate => {
            let source = cli.config.as_deref().unwrap_or("defaults");
            run_validate(source, &load_config(cli)?, cli.format)
        }

        Commands::Status => run_status(&load_config(cli)?, cli.format),

        Commands::Clear { check } => run_clear(&load_config(cli)?, check, cli.format),

        Commands::Completions { shell } => {
            generate_completions(*shell);
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config, AppError> {
    let config = ConfigBuilder::new()
        .with_file(cli.config.as_deref())?
        .with_state_dir(cli.state_dir.clone())
        .build()?;
    Ok(config)
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Config(alerter::error::ConfigError::FileNotFound(_)) => {
            eprintln!();
            eprintln!("Hint: Pass --config PATH or place a config at one of the");
            eprintln!("      default locations (alerter.toml, ~/.config/alerter/).");
        }
        AppError::StorageFailures { .. } | AppError::Store(_) => {
            eprintln!();
            eprintln!("Hint: Check permissions on the state directory, or point");
            eprintln!("      --state-dir at a writable one.");
        }
        AppError::CheckNotFound(_) => {
            eprintln!();
            eprintln!("Hint: 'alerter status' lists the configured checks.");
        }
        _ => {}
    }
}
