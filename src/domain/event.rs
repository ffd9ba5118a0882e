//! Event log records for check history
//!
//! A check's history is an insertion-ordered list of pass/fail events. The
//! counting helpers here define how the evaluator reads that history: failure
//! streaks are counted from the oldest event forward, success runs from the
//! newest event backward.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded check evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEvent {
    /// Unix timestamp (seconds) when the evaluation happened
    pub ts: i64,
    /// Whether the check passed
    pub status: bool,
}

impl AlertEvent {
    /// Create an event with an explicit timestamp
    pub const fn new(ts: i64, status: bool) -> Self {
        Self { ts, status }
    }

    /// Record a result observed now
    pub fn now(status: bool) -> Self {
        Self::new(now_ts(), status)
    }

    /// Whether this event records a success
    #[inline]
    pub const fn passed(&self) -> bool {
        self.status
    }
}

/// Consecutive failures from the start of the log, stopping at the first success
///
/// An interleaved success freezes this count at the length of the first
/// failure streak, which is what makes flapping checks behave the way the
/// evaluator tests pin down.
pub fn leading_failures(events: &[AlertEvent]) -> u32 {
    events.iter().take_while(|e| !e.passed()).count() as u32
}

/// Consecutive successes at the end of the log
pub fn trailing_successes(events: &[AlertEvent]) -> u32 {
    events.iter().rev().take_while(|e| e.passed()).count() as u32
}

/// Current unix timestamp in seconds
pub fn now_ts() -> i64 {
    Utc::now().timestamp()
}

/// Render a unix timestamp for alert text
pub fn format_ts(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| format!("@{}", ts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(statuses: &[bool]) -> Vec<AlertEvent> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, &status)| AlertEvent::new(i as i64, status))
            .collect()
    }

    #[test]
    fn test_leading_failures_counts_until_first_success() {
        assert_eq!(leading_failures(&log(&[])), 0);
        assert_eq!(leading_failures(&log(&[false, false, false])), 3);
        assert_eq!(leading_failures(&log(&[false, false, true, false])), 2);
        assert_eq!(leading_failures(&log(&[true, false, false])), 0);
    }

    #[test]
    fn test_trailing_successes_counts_from_newest() {
        assert_eq!(trailing_successes(&log(&[])), 0);
        assert_eq!(trailing_successes(&log(&[false, true, true])), 2);
        assert_eq!(trailing_successes(&log(&[false, true, false])), 0);
        assert_eq!(trailing_successes(&log(&[true, true, true])), 3);
    }

    #[test]
    fn test_format_ts_epoch() {
        assert_eq!(format_ts(0), "1970-01-01 00:00:00 UTC");
    }

    #[test]
    fn test_event_now_is_recent() {
        let event = AlertEvent::now(true);
        assert!(event.passed());
        assert!((now_ts() - event.ts).abs() < 5);
    }
}
