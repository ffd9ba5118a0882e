//! Threshold evaluation over per-check event history
//!
//! Every check run appends one event to the check's log and reduces the log
//! to a verdict: stay quiet, raise an alert, or announce recovery. The
//! failure count is the run of failures at the start of the log, so a
//! success that interrupts a streak freezes that count until the log resets.

use crate::alerts::notifier::Notification;
use crate::domain::{
    format_ts, leading_failures, now_ts, trailing_successes, AlertEvent, CheckId, Severity,
    ThresholdConfig,
};
use crate::error::{CheckFailure, StoreError};
use crate::store::EventStore;

/// Verdict for a single recorded event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// Record and move on, nobody is told
    Silent,
    /// The failure streak warrants an outgoing alert
    Alert {
        severity: Severity,
        message: String,
        prefix: String,
    },
    /// Enough successes in a row, announce the recovery
    Clear { message: String },
}

impl Evaluation {
    /// Convert the verdict into a deliverable notification, if any
    ///
    /// Recoveries always go out at critical severity so that everyone who
    /// heard about the alert also hears that it ended.
    pub fn into_notification(self, check: &CheckId) -> Option<Notification> {
        match self {
            Evaluation::Silent => None,
            Evaluation::Alert {
                severity,
                message,
                prefix,
            } => Some(Notification::new(check.clone(), severity, message).with_prefix(prefix)),
            Evaluation::Clear { message } => {
                Some(Notification::new(check.clone(), Severity::Critical, message))
            }
        }
    }

    /// Whether this verdict produces an outgoing notification
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Evaluation::Silent)
    }
}

/// Applies per-check thresholds to an event store
pub struct ThresholdEvaluator<'a> {
    store: &'a dyn EventStore,
}

impl<'a> ThresholdEvaluator<'a> {
    /// Create an evaluator over a store
    pub fn new(store: &'a dyn EventStore) -> Self {
        Self { store }
    }

    /// Record a failed run and decide whether to alert
    ///
    /// Alerts fire when the leading failure count lands exactly on
    /// `alert_after`, then again every `remind_every` failures past it. An
    /// `alert_after` of zero alerts on every failure.
    pub fn record_failure(
        &self,
        check: &CheckId,
        thresholds: &ThresholdConfig,
        failure: &CheckFailure,
    ) -> Result<Evaluation, StoreError> {
        let ts = now_ts();
        self.store.append(check, AlertEvent::new(ts, false))?;
        let events = self.store.read_all(check)?;

        let fails = leading_failures(&events);
        let at_threshold = fails == thresholds.alert_after;
        let remind_now = fails > thresholds.alert_after
            && (fails - thresholds.alert_after) % thresholds.remind_every == 0;

        if !at_threshold && !remind_now {
            return Ok(Evaluation::Silent);
        }

        let mut prefix = format!(
            "Threshold of {} reached at {}",
            thresholds.alert_after,
            format_ts(ts)
        );
        if remind_now {
            prefix.push_str(&format!(
                " (reminding every {} fails)",
                thresholds.remind_every
            ));
        }

        Ok(Evaluation::Alert {
            severity: failure.severity,
            message: failure.message.clone(),
            prefix,
        })
    }

    /// Record a successful run and decide whether to announce recovery
    ///
    /// Successes are only recorded while a failure streak is being tracked
    /// and clearing is enabled. A streak that never reached `alert_after`
    /// resets silently; otherwise `clear_after` consecutive successes clear
    /// the alert and reset the log.
    pub fn record_success(
        &self,
        check: &CheckId,
        thresholds: &ThresholdConfig,
    ) -> Result<Evaluation, StoreError> {
        if thresholds.clear_after == 0 || !self.store.has_failures(check)? {
            return Ok(Evaluation::Silent);
        }

        let ts = now_ts();
        self.store.append(check, AlertEvent::new(ts, true))?;
        let events = self.store.read_all(check)?;
        let total = events.len() as u32;

        if total < thresholds.alert_after {
            self.store.reset(check)?;
            return Ok(Evaluation::Silent);
        }

        if total >= thresholds.clear_after && trailing_successes(&events) >= thresholds.clear_after
        {
            self.store.reset(check)?;
            return Ok(Evaluation::Clear {
                message: format!("The alert '{}' was cleared at {}.", check, format_ts(ts)),
            });
        }

        Ok(Evaluation::Silent)
    }
}
