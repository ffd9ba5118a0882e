//! Command-backed messenger
//!
//! Delivers by spawning a user-configured command per channel. The
//! destination is appended as the final argument and exported as
//! `ALERTER_DESTINATION`; the message body is written to stdin. Email
//! commands also receive `ALERTER_SUBJECT`.

use super::{Channel, LogMessenger, Messenger};
use crate::error::ChannelError;

use std::io::Write;
use std::process::{Command, Stdio};

/// Environment variable carrying the destination
pub const ENV_DESTINATION: &str = "ALERTER_DESTINATION";
/// Environment variable carrying the email subject
pub const ENV_SUBJECT: &str = "ALERTER_SUBJECT";

/// Per-channel delivery commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelCommands {
    /// argv for email delivery
    pub email: Option<Vec<String>>,
    /// argv for SMS delivery
    pub sms: Option<Vec<String>>,
    /// argv for voice delivery
    pub voice: Option<Vec<String>>,
    /// Subject line exported to the email command
    pub email_subject: String,
}

impl Default for ChannelCommands {
    fn default() -> Self {
        Self {
            email: None,
            sms: None,
            voice: None,
            email_subject: "Alert".to_string(),
        }
    }
}

/// Messenger that shells out to configured commands
///
/// Channels without a command fall back to logging, so a partially
/// configured setup still reports what it would have sent.
pub struct CommandMessenger {
    commands: ChannelCommands,
}

impl CommandMessenger {
    /// Create a messenger from per-channel commands
    pub fn new(commands: ChannelCommands) -> Self {
        Self { commands }
    }

    fn deliver(
        &self,
        channel: Channel,
        argv: Option<&[String]>,
        destination: &str,
        message: &str,
    ) -> Result<(), ChannelError> {
        let Some(argv) = argv else {
            log::debug!("no {} command configured, logging instead", channel);
            return LogMessenger.send(channel, destination, message);
        };
        let Some((program, args)) = argv.split_first() else {
            return Err(ChannelError::new(channel, destination, "empty delivery command"));
        };

        let mut cmd = Command::new(program);
        cmd.args(args)
            .arg(destination)
            .env(ENV_DESTINATION, destination)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if channel == Channel::Email {
            cmd.env(ENV_SUBJECT, &self.commands.email_subject);
        }

        let mut child = cmd.spawn().map_err(|e| {
            ChannelError::new(channel, destination, format!("spawn failed: {}", e))
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            // a command may exit without reading stdin; its exit status
            // decides success, not the broken pipe
            if let Err(e) = stdin.write_all(message.as_bytes()) {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(ChannelError::new(
                        channel,
                        destination,
                        format!("write to stdin failed: {}", e),
                    ));
                }
            }
            // dropping stdin closes the pipe so the command sees EOF
        }

        let output = child.wait_with_output().map_err(|e| {
            ChannelError::new(channel, destination, format!("wait failed: {}", e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ChannelError::new(
                channel,
                destination,
                format!("command exited {}: {}", output.status, stderr.trim()),
            ));
        }

        log::debug!("{} delivered to {} via command", channel, destination);
        Ok(())
    }
}

impl Messenger for CommandMessenger {
    fn send_email(&self, address: &str, message: &str) -> Result<(), ChannelError> {
        self.deliver(Channel::Email, self.commands.email.as_deref(), address, message)
    }

    fn send_sms(&self, number: &str, message: &str) -> Result<(), ChannelError> {
        self.deliver(Channel::Sms, self.commands.sms.as_deref(), number, message)
    }

    fn place_voice_call(&self, number: &str, message: &str) -> Result<(), ChannelError> {
        self.deliver(Channel::Voice, self.commands.voice.as_deref(), number, message)
    }

    fn name(&self) -> &str {
        "command"
    }
}
