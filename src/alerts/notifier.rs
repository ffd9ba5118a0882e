//! Notification rendering and per-alertee delivery
//!
//! One notification fans out to each subscribed channel of an alertee.
//! Delivery failures are collected, not fatal, so one refused channel
//! never starves the rest.

use crate::alerts::resolver::Alertee;
use crate::channel::{Channel, Messenger};
use crate::domain::{CheckId, Severity};
use crate::error::{ChannelError, NotifyError};

/// A message ready to fan out to alertees
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Check this notification is about
    pub check: CheckId,
    /// Severity used to filter channel subscriptions
    pub severity: Severity,
    /// Body text
    pub message: String,
    /// Threshold context prepended on text channels
    pub text_prefix: Option<String>,
}

impl Notification {
    /// Create a notification without a prefix
    pub fn new(check: CheckId, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            check,
            severity,
            message: message.into(),
            text_prefix: None,
        }
    }

    /// Builder: attach the threshold context prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.text_prefix = Some(prefix.into());
        self
    }

    /// Body as delivered on the given channel
    ///
    /// Voice calls get the bare message, a read-out timestamp prefix is
    /// just noise on a phone call.
    pub fn rendered(&self, channel: Channel) -> String {
        match &self.text_prefix {
            Some(prefix) if !channel.is_voice() => format!("{}: {}", prefix, self.message),
            _ => self.message.clone(),
        }
    }
}

/// Delivers notifications to alertees through a messenger
pub struct Notifier<'a> {
    messenger: &'a dyn Messenger,
}

impl<'a> Notifier<'a> {
    /// Create a notifier over a messenger
    pub fn new(messenger: &'a dyn Messenger) -> Self {
        Self { messenger }
    }

    /// Deliver a notification to every subscribed channel of one alertee
    ///
    /// Channels whose mask does not include the notification's severity are
    /// skipped. Every remaining channel is attempted even after a failure;
    /// the failures come back together in the error.
    pub fn notify_alertee(
        &self,
        name: &str,
        alertee: &Alertee,
        notification: &Notification,
    ) -> Result<(), NotifyError> {
        let mut failures: Vec<ChannelError> = Vec::new();

        for (channel, target) in &alertee.channels {
            if !target.mask.matches(notification.severity) {
                log::debug!(
                    "Skipping {} for '{}': {} not subscribed",
                    channel,
                    name,
                    notification.severity
                );
                continue;
            }

            let body = notification.rendered(*channel);
            log::debug!(
                "Notifying '{}' via {} about '{}'",
                name,
                channel,
                notification.check
            );
            if let Err(err) = self.messenger.send(*channel, &target.destination, &body) {
                log::warn!("Failed to notify '{}' via {}: {}", name, channel, err);
                failures.push(err);
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(NotifyError::Delivery(failures))
        }
    }
}
