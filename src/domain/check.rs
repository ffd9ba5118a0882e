//! Check identity, outcome, and threshold configuration

use crate::error::CheckFailure;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a check by its configured name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CheckId(String);

impl CheckId {
    /// Create a new check id
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The configured name
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Storage key: non-alphanumerics stripped, lowercased
    ///
    /// Two distinct names can share a slug; configuration loading rejects
    /// that so logs are never silently shared.
    pub fn slug(&self) -> String {
        self.0
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_ascii_lowercase()
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CheckId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for CheckId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Per-check notification thresholds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Consecutive failures before the first alert (0 = alert on the first failure)
    pub alert_after: u32,
    /// Consecutive successes before an explicit all-clear (0 = never send one)
    pub clear_after: u32,
    /// Reminder cadence once past the threshold
    pub remind_every: u32,
    /// Alert groups notified for this check
    pub groups: Vec<String>,
}

impl ThresholdConfig {
    /// Create a config; `remind_every` defaults to `alert_after` with a floor of 1
    pub fn new(
        alert_after: u32,
        clear_after: u32,
        remind_every: Option<u32>,
        groups: Vec<String>,
    ) -> Self {
        Self {
            alert_after,
            clear_after,
            remind_every: remind_every.unwrap_or(alert_after).max(1),
            groups,
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self::new(0, 0, None, Vec::new())
    }
}

/// Result of invoking a check once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The check passed
    Success,
    /// The check ran and declared a failure
    Failure(CheckFailure),
    /// The check itself broke (bug, spawn failure, unexpected exit)
    InternalError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_strips_and_lowercases() {
        assert_eq!(CheckId::new("Web Frontend").slug(), "webfrontend");
        assert_eq!(CheckId::new("db-replica.2").slug(), "dbreplica2");
        assert_eq!(CheckId::new("API_v1").slug(), "apiv1");
    }

    #[test]
    fn test_slug_can_collide() {
        assert_eq!(CheckId::new("check-1").slug(), CheckId::new("check.1").slug());
    }

    #[test]
    fn test_slug_empty_for_punctuation_only() {
        assert_eq!(CheckId::new("---").slug(), "");
    }

    #[test]
    fn test_remind_every_defaults_to_alert_after() {
        let config = ThresholdConfig::new(3, 2, None, vec![]);
        assert_eq!(config.remind_every, 3);
    }

    #[test]
    fn test_remind_every_floor_is_one() {
        // alert_after 0 would make the default cadence 0, which is meaningless
        let config = ThresholdConfig::new(0, 0, None, vec![]);
        assert_eq!(config.remind_every, 1);

        let config = ThresholdConfig::new(3, 0, Some(0), vec![]);
        assert_eq!(config.remind_every, 1);
    }

    #[test]
    fn test_explicit_remind_every_wins() {
        let config = ThresholdConfig::new(5, 2, Some(2), vec![]);
        assert_eq!(config.remind_every, 2);
    }
}
