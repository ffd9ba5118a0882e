//! Notification delivery channels
//!
//! A finite set of channels dispatched through an injected messenger
//! capability. Transport correctness is the messenger's problem; the engine
//! only picks the channel and formats the message.

pub mod command;
pub mod messenger;

pub use command::{ChannelCommands, CommandMessenger};
pub use messenger::{LogMessenger, Messenger};

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Delivery channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Email delivery
    Email,
    /// Text message delivery
    Sms,
    /// Voice call delivery
    Voice,
}

impl Channel {
    /// Whether messages on this channel are spoken rather than read
    ///
    /// Voice messages skip the text prefix; a synthesized voice reading a
    /// timestamp header helps nobody.
    #[inline]
    pub const fn is_voice(self) -> bool {
        matches!(self, Self::Voice)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Sms => write!(f, "sms"),
            Self::Voice => write!(f, "voice"),
        }
    }
}

impl FromStr for Channel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "sms" => Ok(Self::Sms),
            // older configurations name the voice channel "call"
            "voice" | "call" => Ok(Self::Voice),
            other => Err(ConfigError::InvalidValue {
                key: "channel".to_string(),
                message: format!("unknown channel '{}' (expected email, sms, or voice)", other),
            }),
        }
    }
}
