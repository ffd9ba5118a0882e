//! Messenger capability and the logging default

use super::Channel;
use crate::error::ChannelError;

/// Outbound delivery capability
///
/// One method per channel so implementations bind each to a concrete
/// transport. All methods take the destination and the already-formatted
/// message body.
pub trait Messenger: Send + Sync {
    /// Deliver by email
    fn send_email(&self, address: &str, message: &str) -> Result<(), ChannelError>;

    /// Deliver by text message
    fn send_sms(&self, number: &str, message: &str) -> Result<(), ChannelError>;

    /// Deliver by voice call
    fn place_voice_call(&self, number: &str, message: &str) -> Result<(), ChannelError>;

    /// Dispatch to the method matching `channel`
    fn send(&self, channel: Channel, destination: &str, message: &str) -> Result<(), ChannelError> {
        match channel {
            Channel::Email => self.send_email(destination, message),
            Channel::Sms => self.send_sms(destination, message),
            Channel::Voice => self.place_voice_call(destination, message),
        }
    }

    /// Messenger name for logs
    fn name(&self) -> &str;
}

/// Messenger that logs deliveries instead of sending them
///
/// The default in dry-run mode and the fallback for channels without a
/// configured delivery command.
pub struct LogMessenger;

impl Messenger for LogMessenger {
    fn send_email(&self, address: &str, message: &str) -> Result<(), ChannelError> {
        log::info!("email to {}: {}", address, message);
        Ok(())
    }

    fn send_sms(&self, number: &str, message: &str) -> Result<(), ChannelError> {
        log::info!("sms to {}: {}", number, message);
        Ok(())
    }

    fn place_voice_call(&self, number: &str, message: &str) -> Result<(), ChannelError> {
        log::info!("voice call to {}: {}", number, message);
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}
