//! Check pass orchestration
//!
//! Runs every registered check once, records each outcome against the
//! event store, and fans resulting notifications out to the check's
//! groups. A broken check aborts the pass after its fault alert goes
//! out; a broken event log only skips that one check.

use crate::alerts::{Directory, Evaluation, Notification, Notifier, ThresholdEvaluator};
use crate::channel::Messenger;
use crate::checks::{CheckRegistry, RegisteredCheck};
use crate::domain::{CheckId, CheckOutcome, Severity};
use crate::error::{AppError, NotifyError, Result};
use crate::store::EventStore;

use serde::Serialize;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Counters for one pass over the registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    /// Checks evaluated
    pub evaluated: usize,
    /// Alerts sent, reminders included
    pub alerts: usize,
    /// All-clears sent
    pub clears: usize,
    /// Checks whose event log could not be read or written
    pub storage_failures: usize,
    /// Individual channel deliveries that failed
    pub delivery_failures: usize,
}

/// Runs checks and routes their outcomes
pub struct CheckRunner<'a> {
    registry: &'a CheckRegistry,
    store: &'a dyn EventStore,
    directory: &'a Directory,
    messenger: &'a dyn Messenger,
}

impl<'a> CheckRunner<'a> {
    /// Create a runner over a registry, store, directory, and messenger
    pub fn new(
        registry: &'a CheckRegistry,
        store: &'a dyn EventStore,
        directory: &'a Directory,
        messenger: &'a dyn Messenger,
    ) -> Self {
        Self {
            registry,
            store,
            directory,
            messenger,
        }
    }

    /// Run every registered check once, in name order
    ///
    /// Returns the pass counters, or the first fault that aborted the
    /// pass. A pass that finished but skipped checks over storage
    /// failures comes back as an error so schedulers notice.
    pub fn run_all(&self) -> Result<PassSummary> {
        let evaluator = ThresholdEvaluator::new(self.store);
        let notifier = Notifier::new(self.messenger);
        let mut summary = PassSummary::default();

        for (check, registered) in self.registry.iter() {
            summary.evaluated += 1;
            log::debug!("Running check '{}'", check);

            let result = match self.run_guarded(check, registered, &notifier) {
                CheckOutcome::Success => evaluator.record_success(check, &registered.thresholds),
                CheckOutcome::Failure(failure) => {
                    log::debug!("Check '{}' failed: {}", check, failure.message);
                    evaluator.record_failure(check, &registered.thresholds, &failure)
                }
                CheckOutcome::InternalError(message) => {
                    log::error!("Check '{}' faulted: {}", check, message);
                    self.alert_fault(check, &registered.thresholds.groups, &message, &notifier)?;
                    return Err(AppError::CheckFault {
                        check: check.to_string(),
                        message,
                    });
                }
            };

            match result {
                Ok(evaluation) => {
                    self.dispatch(check, registered, evaluation, &notifier, &mut summary)?;
                }
                Err(err) => {
                    log::error!("Event log for '{}' failed, its state is unknown: {}", check, err);
                    summary.storage_failures += 1;
                }
            }
        }

        log::info!(
            "Pass complete: {} evaluated, {} alert(s), {} clear(s)",
            summary.evaluated,
            summary.alerts,
            summary.clears
        );

        if summary.storage_failures > 0 {
            return Err(AppError::StorageFailures {
                failed: summary.storage_failures,
            });
        }
        Ok(summary)
    }

    /// Run one check, turning a panic into a fault alert before it resumes
    fn run_guarded(
        &self,
        check: &CheckId,
        registered: &RegisteredCheck,
        notifier: &Notifier,
    ) -> CheckOutcome {
        match panic::catch_unwind(AssertUnwindSafe(|| registered.run())) {
            Ok(outcome) => outcome,
            Err(payload) => {
                let message = panic_message(&*payload);
                log::error!("Check '{}' panicked: {}", check, message);
                if let Err(err) =
                    self.alert_fault(check, &registered.thresholds.groups, &message, notifier)
                {
                    log::error!("Failed to send fault alert for '{}': {}", check, err);
                }
                panic::resume_unwind(payload)
            }
        }
    }

    /// Send an outgoing notification for an actionable verdict
    fn dispatch(
        &self,
        check: &CheckId,
        registered: &RegisteredCheck,
        evaluation: Evaluation,
        notifier: &Notifier,
        summary: &mut PassSummary,
    ) -> Result<()> {
        let is_clear = matches!(evaluation, Evaluation::Clear { .. });
        let Some(notification) = evaluation.into_notification(check) else {
            return Ok(());
        };

        if is_clear {
            log::info!("Check '{}' cleared", check);
            summary.clears += 1;
        } else {
            log::info!("Check '{}' alerting at {}", check, notification.severity);
            summary.alerts += 1;
        }

        summary.delivery_failures +=
            self.fan_out(&registered.thresholds.groups, &notification, notifier)?;
        Ok(())
    }

    /// Tell a check's own groups that the check itself is broken
    fn alert_fault(
        &self,
        check: &CheckId,
        groups: &[String],
        message: &str,
        notifier: &Notifier,
    ) -> Result<()> {
        let notification = Notification::new(
            check.clone(),
            Severity::Warning,
            format!("Check '{}' is broken: {}", check, message),
        );
        self.fan_out(groups, &notification, notifier)?;
        Ok(())
    }

    /// Deliver one notification to every alertee of the given groups
    ///
    /// Returns the number of failed channel deliveries. An unknown group
    /// is a configuration error and propagates.
    fn fan_out(
        &self,
        groups: &[String],
        notification: &Notification,
        notifier: &Notifier,
    ) -> Result<usize> {
        let mut failed = 0;
        for (name, alertee) in self.directory.resolve_alertees(groups)? {
            if let Err(NotifyError::Delivery(errors)) =
                notifier.notify_alertee(name, alertee, notification)
            {
                failed += errors.len();
            }
        }
        Ok(failed)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "check panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::{Alertee, ChannelTarget};
    use crate::channel::Channel;
    use crate::domain::{SeverityMask, ThresholdConfig};
    use crate::error::{CheckError, CheckFailure, ConfigError};
    use crate::mock::{FailingStore, MockMessenger};
    use crate::store::MemoryStore;

    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn thresholds(alert_after: u32, clear_after: u32) -> ThresholdConfig {
        ThresholdConfig::new(alert_after, clear_after, None, vec!["ops".to_string()])
    }

    fn directory(channels: &[Channel]) -> Directory {
        let mut alertee = Alertee::new();
        for channel in channels {
            alertee = alertee.with_channel(
                *channel,
                ChannelTarget::new("alice@example.com", SeverityMask::ALL),
            );
        }
        let groups = BTreeMap::from([("ops".to_string(), vec!["alice".to_string()])]);
        let alertees = BTreeMap::from([("alice".to_string(), alertee)]);
        Directory::new(groups, alertees)
    }

    #[test]
    fn test_pass_counts_evaluated_checks() {
        let mut registry = CheckRegistry::new();
        registry.register("db", thresholds(1, 1), || Ok(()));
        registry.register("web", thresholds(1, 1), || Ok(()));
        let store = MemoryStore::new();
        let dir = directory(&[Channel::Email]);
        let messenger = MockMessenger::new();

        let summary = CheckRunner::new(&registry, &store, &dir, &messenger)
            .run_all()
            .unwrap();
        assert_eq!(summary.evaluated, 2);
        assert_eq!(summary.alerts, 0);
        assert!(messenger.sent().is_empty());
    }

    #[test]
    fn test_alert_reaches_group_members() {
        let mut registry = CheckRegistry::new();
        registry.register("db", thresholds(1, 1), || {
            Err(CheckFailure::critical("connection refused").into())
        });
        let store = MemoryStore::new();
        let dir = directory(&[Channel::Email]);
        let messenger = MockMessenger::new();

        let summary = CheckRunner::new(&registry, &store, &dir, &messenger)
            .run_all()
            .unwrap();
        assert_eq!(summary.alerts, 1);
        let sent = messenger.sent_on(Channel::Email);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].destination, "alice@example.com");
        assert!(sent[0].message.contains("connection refused"));
        assert!(sent[0].message.contains("Threshold of 1 reached"));
    }

    #[test]
    fn test_failures_below_threshold_send_nothing() {
        let mut registry = CheckRegistry::new();
        registry.register("db", thresholds(3, 1), || {
            Err(CheckFailure::critical("down").into())
        });
        let store = MemoryStore::new();
        let dir = directory(&[Channel::Email]);
        let messenger = MockMessenger::new();

        let summary = CheckRunner::new(&registry, &store, &dir, &messenger)
            .run_all()
            .unwrap();
        assert_eq!(summary.alerts, 0);
        assert!(messenger.sent().is_empty());
    }

    #[test]
    fn test_recovery_sends_all_clear() {
        let healthy = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&healthy);
        let mut registry = CheckRegistry::new();
        registry.register("db", thresholds(1, 2), move || {
            if flag.load(Ordering::SeqCst) {
                Ok(())
            } else {
                Err(CheckFailure::critical("down").into())
            }
        });
        let store = MemoryStore::new();
        let dir = directory(&[Channel::Email]);
        let messenger = MockMessenger::new();
        let runner = CheckRunner::new(&registry, &store, &dir, &messenger);

        runner.run_all().unwrap();
        healthy.store(true, Ordering::SeqCst);
        runner.run_all().unwrap();
        let summary = runner.run_all().unwrap();

        assert_eq!(summary.clears, 1);
        let sent = messenger.sent_on(Channel::Email);
        assert!(sent.last().unwrap().message.contains("was cleared at"));
    }

    #[test]
    fn test_fault_alerts_groups_and_aborts() {
        let mut registry = CheckRegistry::new();
        registry.register("db", thresholds(1, 1), || {
            Err(CheckError::Internal("query builder bug".to_string()))
        });
        registry.register("web", thresholds(1, 1), || {
            Err(CheckFailure::critical("down").into())
        });
        let store = MemoryStore::new();
        let dir = directory(&[Channel::Email]);
        let messenger = MockMessenger::new();

        let err = CheckRunner::new(&registry, &store, &dir, &messenger)
            .run_all()
            .unwrap_err();
        assert!(matches!(err, AppError::CheckFault { check, .. } if check == "db"));

        // The fault alert went out, and the later check never ran.
        let sent = messenger.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].message, "Check 'db' is broken: query builder bug");
        assert!(store.read_all(&CheckId::from("web")).unwrap().is_empty());
    }

    #[test]
    fn test_panic_sends_fault_alert_before_resuming() {
        let mut registry = CheckRegistry::new();
        registry.register("db", thresholds(1, 1), || panic!("boom"));
        let store = MemoryStore::new();
        let dir = directory(&[Channel::Email]);
        let messenger = MockMessenger::new();
        let runner = CheckRunner::new(&registry, &store, &dir, &messenger);

        let result = panic::catch_unwind(AssertUnwindSafe(|| runner.run_all()));
        assert!(result.is_err());
        let sent = messenger.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].message, "Check 'db' is broken: boom");
    }

    #[test]
    fn test_storage_failures_skip_checks_but_finish_pass() {
        let mut registry = CheckRegistry::new();
        registry.register("db", thresholds(1, 1), || {
            Err(CheckFailure::critical("down").into())
        });
        registry.register("web", thresholds(1, 1), || {
            Err(CheckFailure::critical("down").into())
        });
        let store = FailingStore;
        let dir = directory(&[Channel::Email]);
        let messenger = MockMessenger::new();

        let err = CheckRunner::new(&registry, &store, &dir, &messenger)
            .run_all()
            .unwrap_err();
        assert!(matches!(err, AppError::StorageFailures { failed: 2 }));
        assert!(messenger.sent().is_empty());
    }

    #[test]
    fn test_delivery_failures_counted_not_fatal() {
        let mut registry = CheckRegistry::new();
        registry.register("db", thresholds(1, 1), || {
            Err(CheckFailure::critical("down").into())
        });
        let store = MemoryStore::new();
        let dir = directory(&[Channel::Email, Channel::Sms]);
        let messenger = MockMessenger::with_failing([Channel::Email]);

        let summary = CheckRunner::new(&registry, &store, &dir, &messenger)
            .run_all()
            .unwrap();
        assert_eq!(summary.alerts, 1);
        assert_eq!(summary.delivery_failures, 1);
        assert_eq!(messenger.sent_on(Channel::Sms).len(), 1);
    }

    #[test]
    fn test_unknown_group_aborts_pass() {
        let mut registry = CheckRegistry::new();
        registry.register(
            "db",
            ThresholdConfig::new(1, 1, None, vec!["oncall".to_string()]),
            || Err(CheckFailure::critical("down").into()),
        );
        let store = MemoryStore::new();
        let dir = directory(&[Channel::Email]);
        let messenger = MockMessenger::new();

        let err = CheckRunner::new(&registry, &store, &dir, &messenger)
            .run_all()
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::UnknownGroup(group)) if group == "oncall"
        ));
    }
}
