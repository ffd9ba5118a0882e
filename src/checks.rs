//! Check registration and command-backed checks
//!
//! A check is any callable returning `Ok(())` on success. The registry
//! pairs each one with its thresholds; command-backed checks wrap an
//! external process and classify its exit code.

use crate::config::Config;
use crate::domain::{CheckId, CheckOutcome, Severity, ThresholdConfig};
use crate::error::{CheckError, CheckFailure};

use std::collections::BTreeMap;
use std::process::Command;

/// A check body: `Ok(())` passes, `Err` fails or faults
pub type CheckFn = Box<dyn Fn() -> Result<(), CheckError> + Send + Sync>;

/// A check with its thresholds, ready to run
pub struct RegisteredCheck {
    /// Notification thresholds and groups
    pub thresholds: ThresholdConfig,
    func: CheckFn,
}

impl RegisteredCheck {
    /// Create a check from thresholds and a body
    pub fn new(thresholds: ThresholdConfig, func: CheckFn) -> Self {
        Self { thresholds, func }
    }

    /// Run the check body once and classify the result
    pub fn run(&self) -> CheckOutcome {
        match (self.func)() {
            Ok(()) => CheckOutcome::Success,
            Err(CheckError::Failure(failure)) => CheckOutcome::Failure(failure),
            Err(CheckError::Internal(message)) => CheckOutcome::InternalError(message),
        }
    }
}

/// Checks keyed by name, evaluated in name order
#[derive(Default)]
pub struct CheckRegistry {
    checks: BTreeMap<CheckId, RegisteredCheck>,
}

impl CheckRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a check under a name
    ///
    /// Registering the same name twice replaces the earlier check.
    pub fn register<F>(&mut self, check: impl Into<CheckId>, thresholds: ThresholdConfig, func: F)
    where
        F: Fn() -> Result<(), CheckError> + Send + Sync + 'static,
    {
        self.checks
            .insert(check.into(), RegisteredCheck::new(thresholds, Box::new(func)));
    }

    /// Build a registry from the command-backed checks in a configuration
    ///
    /// Checks without a command belong to library callers and are skipped.
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::new();
        for (check, settings) in &config.checks {
            let Some(command) = &settings.command else {
                log::debug!("Check '{}' has no command, not runnable here", check);
                continue;
            };
            let command_check = CommandCheck::new(command.clone(), settings.severity);
            registry.register(check.clone(), settings.thresholds.clone(), move || {
                command_check.run()
            });
        }
        registry
    }

    /// Iterate checks in name order
    pub fn iter(&self) -> impl Iterator<Item = (&CheckId, &RegisteredCheck)> {
        self.checks.iter()
    }

    /// Number of registered checks
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

/// Runs an external command and maps its exit status to an outcome
///
/// Exit 0 passes; exit 1 is a warning failure and exit 2 a critical one,
/// unless an override severity is configured. Any other status, and any
/// spawn failure, is an internal fault rather than a routable alert.
pub struct CommandCheck {
    argv: Vec<String>,
    severity: Option<Severity>,
}

impl CommandCheck {
    /// Create a command check
    pub fn new(argv: Vec<String>, severity: Option<Severity>) -> Self {
        Self { argv, severity }
    }

    /// Run the command once
    pub fn run(&self) -> Result<(), CheckError> {
        let Some((program, args)) = self.argv.split_first() else {
            return Err(CheckError::Internal("empty check command".to_string()));
        };

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| CheckError::Internal(format!("failed to run '{}': {}", program, e)))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let detail = if stderr.trim().is_empty() {
            stdout.trim()
        } else {
            stderr.trim()
        };

        match output.status.code() {
            Some(0) => Ok(()),
            Some(1) => self.failure(Severity::Warning, 1, detail),
            Some(2) => self.failure(Severity::Critical, 2, detail),
            Some(code) => Err(CheckError::Internal(format!(
                "'{}' exited with unexpected status {}",
                self.argv.join(" "),
                code
            ))),
            None => Err(CheckError::Internal(format!(
                "'{}' terminated by a signal",
                self.argv.join(" ")
            ))),
        }
    }

    fn failure(&self, default: Severity, code: i32, detail: &str) -> Result<(), CheckError> {
        let severity = self.severity.unwrap_or(default);
        let message = if detail.is_empty() {
            format!("'{}' exited with status {}", self.argv.join(" "), code)
        } else {
            detail.to_string()
        };
        Err(CheckFailure::new(severity, message).into())
    }
}
