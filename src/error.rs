//! Unified error types for alerter
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use crate::channel::Channel;
use crate::domain::Severity;
use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from the event log store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error from notification delivery
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// A check raised an internal fault rather than a declared failure
    #[error("Check '{check}' raised an internal fault: {message}")]
    CheckFault { check: String, message: String },

    /// One or more checks were skipped because their logs could not be
    /// read or written
    #[error("{failed} check(s) skipped due to storage failures")]
    StorageFailures { failed: usize },

    /// Check not found in the configuration
    #[error("Check not found: {0}")]
    CheckNotFound(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A declared check failure carrying the severity to alert at
///
/// This is the "expected" failure path: the monitored thing is broken,
/// the check itself worked fine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CheckFailure {
    /// Severity recipients are filtered against
    pub severity: Severity,
    /// Human-readable failure description
    pub message: String,
}

impl CheckFailure {
    /// Create a failure at the given severity
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    /// Notice-level failure
    pub fn notice(message: impl Into<String>) -> Self {
        Self::new(Severity::Notice, message)
    }

    /// Warning-level failure
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Critical-level failure
    pub fn critical(message: impl Into<String>) -> Self {
        Self::new(Severity::Critical, message)
    }
}

/// Errors a check invocation can produce
#[derive(Error, Debug)]
pub enum CheckError {
    /// The check ran and declared a failure
    #[error(transparent)]
    Failure(#[from] CheckFailure),

    /// The check itself is broken (bug, spawn failure, unexpected exit)
    #[error("internal check error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for CheckError {
    fn from(err: std::io::Error) -> Self {
        CheckError::Internal(err.to_string())
    }
}

/// Errors from the persistent event log store
#[derive(Error, Debug)]
pub enum StoreError {
    /// State directory could not be created or accessed
    #[error("Failed to prepare state directory '{dir}': {message}")]
    DirUnavailable { dir: String, message: String },

    /// Failed to read an event log
    #[error("Failed to read event log for '{check}': {message}")]
    ReadFailed { check: String, message: String },

    /// Failed to write an event log
    #[error("Failed to write event log for '{check}': {message}")]
    WriteFailed { check: String, message: String },

    /// Failed to delete an event log
    #[error("Failed to reset event log for '{check}': {message}")]
    ResetFailed { check: String, message: String },

    /// Log file exists but does not parse as an event list
    #[error("Corrupt event log for '{check}': {message}")]
    Corrupt { check: String, message: String },
}

/// A single failed channel delivery
#[derive(Error, Debug)]
#[error("{channel} delivery to {destination} failed: {message}")]
pub struct ChannelError {
    /// Channel that failed
    pub channel: Channel,
    /// Destination address or number
    pub destination: String,
    /// What went wrong
    pub message: String,
}

impl ChannelError {
    /// Create a channel error
    pub fn new(channel: Channel, destination: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            channel,
            destination: destination.into(),
            message: message.into(),
        }
    }
}

/// Errors from notification fan-out
#[derive(Error, Debug)]
pub enum NotifyError {
    /// One or more channel deliveries failed; the rest were still attempted
    #[error("{} delivery failure(s)", .0.len())]
    Delivery(Vec<ChannelError>),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// A check references a group that is not configured
    #[error("Unknown alert group: {0}")]
    UnknownGroup(String),

    /// A group references an alertee that is not configured
    #[error("Group '{group}' references unknown alertee: {alertee}")]
    UnknownAlertee { group: String, alertee: String },

    /// Two check names reduce to the same storage slug
    #[error("Checks '{first}' and '{second}' share the storage slug '{slug}'")]
    SlugCollision {
        first: String,
        second: String,
        slug: String,
    },

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_failure_display() {
        let failure = CheckFailure::critical("database unreachable");
        assert_eq!(failure.to_string(), "database unreachable");
        assert_eq!(failure.severity, Severity::Critical);
    }

    #[test]
    fn test_check_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: CheckError = io.into();
        assert!(matches!(err, CheckError::Internal(_)));
        assert!(err.to_string().contains("no such file"));
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Corrupt {
            check: "web".to_string(),
            message: "expected an array".to_string(),
        };
        assert!(err.to_string().contains("Corrupt event log for 'web'"));
    }

    #[test]
    fn test_channel_error_display() {
        let err = ChannelError::new(Channel::Sms, "+15551234567", "carrier rejected");
        assert_eq!(
            err.to_string(),
            "sms delivery to +15551234567 failed: carrier rejected"
        );
    }

    #[test]
    fn test_notify_error_counts_failures() {
        let err = NotifyError::Delivery(vec![
            ChannelError::new(Channel::Email, "a@example.com", "bounced"),
            ChannelError::new(Channel::Voice, "+15550000000", "busy"),
        ]);
        assert_eq!(err.to_string(), "2 delivery failure(s)");
    }

    #[test]
    fn test_storage_failures_display() {
        let err = AppError::StorageFailures { failed: 3 };
        assert!(err.to_string().contains("3 check(s) skipped"));
    }

    #[test]
    fn test_error_conversion() {
        let config_err = ConfigError::UnknownGroup("ops".to_string());
        let app_err: AppError = config_err.into();
        assert!(matches!(app_err, AppError::Config(_)));
    }
}
