//! Mock implementations for testing
//!
//! Provides a recording messenger and a failing store for unit testing
//! without spawning delivery commands or touching the filesystem.

use crate::channel::{Channel, Messenger};
use crate::domain::{AlertEvent, CheckId};
use crate::error::{ChannelError, StoreError};
use crate::store::EventStore;

use std::collections::BTreeSet;
use std::sync::Mutex;

/// One recorded delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub channel: Channel,
    pub destination: String,
    pub message: String,
}

/// Messenger that records deliveries instead of sending them
#[derive(Default)]
pub struct MockMessenger {
    sent: Mutex<Vec<SentMessage>>,
    fail_channels: BTreeSet<Channel>,
}

impl MockMessenger {
    /// Create a messenger that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a messenger that refuses the given channels
    pub fn with_failing(channels: impl IntoIterator<Item = Channel>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_channels: channels.into_iter().collect(),
        }
    }

    /// Everything recorded so far, in delivery order
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Recorded deliveries on one channel
    pub fn sent_on(&self, channel: Channel) -> Vec<SentMessage> {
        self.sent()
            .into_iter()
            .filter(|m| m.channel == channel)
            .collect()
    }

    fn record(
        &self,
        channel: Channel,
        destination: &str,
        message: &str,
    ) -> Result<(), ChannelError> {
        if self.fail_channels.contains(&channel) {
            return Err(ChannelError::new(
                channel,
                destination,
                "mock delivery refused",
            ));
        }
        self.sent.lock().unwrap().push(SentMessage {
            channel,
            destination: destination.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}

impl Messenger for MockMessenger {
    fn send_email(&self, address: &str, message: &str) -> Result<(), ChannelError> {
        self.record(Channel::Email, address, message)
    }

    fn send_sms(&self, number: &str, message: &str) -> Result<(), ChannelError> {
        self.record(Channel::Sms, number, message)
    }

    fn place_voice_call(&self, number: &str, message: &str) -> Result<(), ChannelError> {
        self.record(Channel::Voice, number, message)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Store whose every operation fails
pub struct FailingStore;

impl EventStore for FailingStore {
    fn append(&self, check: &CheckId, _event: AlertEvent) -> Result<(), StoreError> {
        Err(StoreError::WriteFailed {
            check: check.to_string(),
            message: "mock store failure".to_string(),
        })
    }

    fn read_all(&self, check: &CheckId) -> Result<Vec<AlertEvent>, StoreError> {
        Err(StoreError::ReadFailed {
            check: check.to_string(),
            message: "mock store failure".to_string(),
        })
    }

    fn reset(&self, check: &CheckId) -> Result<(), StoreError> {
        Err(StoreError::ResetFailed {
            check: check.to_string(),
            message: "mock store failure".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_messenger_records_in_order() {
        let messenger = MockMessenger::new();
        messenger.send_email("a@example.com", "first").unwrap();
        messenger.send_sms("+15551234567", "second").unwrap();

        let sent = messenger.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].channel, Channel::Email);
        assert_eq!(sent[1].message, "second");
        assert_eq!(messenger.sent_on(Channel::Voice).len(), 0);
    }

    #[test]
    fn test_mock_messenger_refuses_configured_channels() {
        let messenger = MockMessenger::with_failing([Channel::Sms]);
        assert!(messenger.send_email("a@example.com", "ok").is_ok());
        let err = messenger.send_sms("+15551234567", "no").unwrap_err();
        assert_eq!(err.channel, Channel::Sms);
        assert_eq!(messenger.sent().len(), 1);
    }

    #[test]
    fn test_failing_store_fails_every_operation() {
        let store = FailingStore;
        let check = CheckId::from("db");
        assert!(store.append(&check, AlertEvent::new(1, false)).is_err());
        assert!(store.read_all(&check).is_err());
        assert!(store.reset(&check).is_err());
        assert!(store.has_failures(&check).is_err());
    }
}
