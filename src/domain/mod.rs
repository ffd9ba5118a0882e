//! Domain models for alerter
//!
//! Core types for severities, check identity, and event history. Types that
//! need validation get it on construction (fail-fast pattern).

pub mod check;
pub mod event;
pub mod severity;

pub use check::{CheckId, CheckOutcome, ThresholdConfig};
pub use event::{format_ts, leading_failures, now_ts, trailing_successes, AlertEvent};
pub use severity::{Severity, SeverityMask};
