//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::services::PassSummary;
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

/// Pass result for display
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub evaluated: usize,
    pub alerts: usize,
    pub clears: usize,
    pub delivery_failures: usize,
}

impl From<&PassSummary> for RunReport {
    fn from(summary: &PassSummary) -> Self {
        Self {
            evaluated: summary.evaluated,
            alerts: summary.alerts,
            clears: summary.clears,
            delivery_failures: summary.delivery_failures,
        }
    }
}

impl TableDisplay for RunReport {
    fn to_table(&self) -> String {
        let mut output = format!("Checks Evaluated: {}\n", self.evaluated);
        output.push_str(&format!("  Alerts Sent: {}\n", self.alerts));
        output.push_str(&format!("  All-Clears Sent: {}\n", self.clears));
        if self.delivery_failures > 0 {
            output.push_str(&format!(
                "  Failed Deliveries: {}\n",
                self.delivery_failures
            ));
        }
        output
    }

    fn to_compact(&self) -> String {
        format!(
            "{} evaluated, {} alerts, {} clears",
            self.evaluated, self.alerts, self.clears
        )
    }
}

/// Event log state of one check
#[derive(Debug, Clone, Serialize)]
pub struct CheckStatusEntry {
    pub check: String,
    pub events: usize,
    pub failing: bool,
    pub streak: u32,
    pub last_event: Option<String>,
}

impl TableDisplay for CheckStatusEntry {
    fn to_table(&self) -> String {
        let state = if self.events == 0 {
            "idle".to_string()
        } else if self.failing {
            format!("failing ({} consecutive)", self.streak)
        } else {
            format!("recovering ({} consecutive passes)", self.streak)
        };

        let mut output = format!("{}: {}\n", self.check, state);
        if self.events > 0 {
            output.push_str(&format!("  Events Logged: {}\n", self.events));
        }
        if let Some(last) = &self.last_event {
            output.push_str(&format!("  Last Event: {}\n", last));
        }
        output
    }

    fn to_compact(&self) -> String {
        if self.events == 0 {
            format!("{}:idle", self.check)
        } else if self.failing {
            format!("{}:failing:{}", self.check, self.streak)
        } else {
            format!("{}:recovering:{}", self.check, self.streak)
        }
    }
}

/// Event log state across all configured checks
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub state_dir: String,
    pub checks: Vec<CheckStatusEntry>,
}

impl TableDisplay for StatusReport {
    fn to_table(&self) -> String {
        let mut output = format!("State Directory: {}\n\n", self.state_dir);

        if self.checks.is_empty() {
            output.push_str("No checks configured\n");
            return output;
        }

        for check in &self.checks {
            output.push_str(&check.to_table());
        }

        output
    }

    fn to_compact(&self) -> String {
        self.checks
            .iter()
            .map(|c| c.to_compact())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Validation summary of a loaded configuration
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub source: String,
    pub checks: usize,
    pub command_checks: usize,
    pub groups: usize,
    pub alertees: usize,
    pub state_dir: String,
    pub channels: Vec<String>,
}

impl TableDisplay for ConfigSummary {
    fn to_table(&self) -> String {
        let mut output = format!("Configuration: {} (valid)\n", self.source);
        output.push_str(&format!(
            "  Checks: {} ({} command-backed)\n",
            self.checks, self.command_checks
        ));
        output.push_str(&format!("  Groups: {}\n", self.groups));
        output.push_str(&format!("  Alertees: {}\n", self.alertees));
        output.push_str(&format!("  State Directory: {}\n", self.state_dir));

        if self.channels.is_empty() {
            output.push_str("  Delivery Commands: none (log only)\n");
        } else {
            output.push_str(&format!("  Delivery Commands: {}\n", self.channels.join(", ")));
        }

        output
    }
}

/// Simple message output
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: String,
    pub success: bool,
}

impl TableDisplay for Message {
    fn to_table(&self) -> String {
        if self.success {
            format!("✓ {}", self.message)
        } else {
            format!("✗ {}", self.message)
        }
    }
}
