//! Configuration system
//!
//! Handles TOML config file parsing and normalization into the engine's
//! typed form. Every cross-reference and mask is validated once here so
//! the rest of the crate never sees a raw string it has to distrust.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::alerts::{Alertee, ChannelTarget, Directory};
use crate::channel::{Channel, ChannelCommands};
use crate::domain::{CheckId, Severity, SeverityMask, ThresholdConfig};
use crate::error::ConfigError;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Top-level configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RawConfig {
    /// General settings
    pub settings: SettingsConfig,
    /// Check name -> thresholds and groups
    pub checks: BTreeMap<String, RawCheckConfig>,
    /// Group name -> alertee names
    pub groups: BTreeMap<String, Vec<String>>,
    /// Alertee name -> channel subscriptions
    pub alertees: BTreeMap<String, BTreeMap<String, RawChannelEntry>>,
    /// Delivery command configuration
    pub channels: ChannelsConfig,
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SettingsConfig {
    /// Directory holding per-check event logs
    pub state_dir: Option<PathBuf>,
}

/// Per-channel delivery commands
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ChannelsConfig {
    /// argv for email delivery
    pub email_command: Option<Vec<String>>,
    /// argv for SMS delivery
    pub sms_command: Option<Vec<String>>,
    /// argv for voice delivery
    pub voice_command: Option<Vec<String>>,
    /// Subject line exported to the email command
    pub email_subject: Option<String>,
}

impl ChannelsConfig {
    /// Convert to the messenger's command set
    pub fn to_commands(&self) -> ChannelCommands {
        let mut commands = ChannelCommands {
            email: self.email_command.clone(),
            sms: self.sms_command.clone(),
            voice: self.voice_command.clone(),
            ..ChannelCommands::default()
        };
        if let Some(subject) = &self.email_subject {
            commands.email_subject = subject.clone();
        }
        commands
    }
}

/// A check entry: either a bare group list or a full table
///
/// `check = ["ops"]` is shorthand for a table with only `groups` set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCheckConfig {
    /// Shorthand: just the groups, all thresholds defaulted
    Groups(Vec<String>),
    /// Full per-check settings
    Full(RawCheckTable),
}

impl RawCheckConfig {
    fn into_table(self) -> RawCheckTable {
        match self {
            Self::Groups(groups) => RawCheckTable {
                groups,
                ..RawCheckTable::default()
            },
            Self::Full(table) => table,
        }
    }
}

/// Full per-check settings table
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RawCheckTable {
    /// Alert groups notified for this check
    pub groups: Vec<String>,
    /// Consecutive failures before the first alert
    pub alert_after: u32,
    /// Consecutive successes before an explicit all-clear
    pub clear_after: u32,
    /// Reminder cadence once past the threshold
    pub remind_every: Option<u32>,
    /// argv to run for this check, exit code mapped to an outcome
    pub command: Option<Vec<String>>,
    /// Overrides the exit-code severity mapping for failing exits
    pub severity: Option<Severity>,
}

/// A channel subscription: `[destination, mask]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawChannelEntry(pub String, pub RawMask);

/// A severity mask: either raw bits or a list of severity names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawMask {
    /// Integer bitmask, 0 through 7
    Bits(u8),
    /// Severity names, unioned
    Names(Vec<String>),
}

impl RawMask {
    /// Convert to a validated mask
    pub fn to_mask(&self) -> Result<SeverityMask, ConfigError> {
        match self {
            Self::Bits(bits) => SeverityMask::from_bits(*bits),
            Self::Names(names) => {
                let mut mask = SeverityMask::NONE;
                for name in names {
                    mask = mask | name.parse::<Severity>()?;
                }
                Ok(mask)
            }
        }
    }
}

/// Normalized per-check settings
#[derive(Debug, Clone)]
pub struct CheckSettings {
    /// Notification thresholds and groups
    pub thresholds: ThresholdConfig,
    /// argv to run for this check, if it is command-backed
    pub command: Option<Vec<String>>,
    /// Overrides the exit-code severity mapping for failing exits
    pub severity: Option<Severity>,
}

/// Validated configuration in the engine's typed form
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding per-check event logs
    pub state_dir: PathBuf,
    /// Delivery command configuration
    pub channels: ChannelCommands,
    /// Check name -> normalized settings
    pub checks: BTreeMap<CheckId, CheckSettings>,
    /// Groups and alertees
    pub directory: Directory,
}

impl RawConfig {
    /// Validate and convert into the engine's typed form
    pub fn normalize(self) -> Result<Config, ConfigError> {
        let mut checks = BTreeMap::new();
        let mut slugs: BTreeMap<String, String> = BTreeMap::new();

        for (name, raw) in self.checks {
            let table = raw.into_table();
            let check = CheckId::new(name);

            let slug = check.slug();
            if slug.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: format!("checks.{}", check),
                    message: "check name contains no alphanumeric characters".to_string(),
                });
            }
            if let Some(first) = slugs.insert(slug.clone(), check.as_str().to_string()) {
                return Err(ConfigError::SlugCollision {
                    first,
                    second: check.as_str().to_string(),
                    slug,
                });
            }

            for group in &table.groups {
                if !self.groups.contains_key(group) {
                    return Err(ConfigError::UnknownGroup(group.clone()));
                }
            }

            let thresholds = ThresholdConfig::new(
                table.alert_after,
                table.clear_after,
                table.remind_every,
                table.groups,
            );
            checks.insert(
                check,
                CheckSettings {
                    thresholds,
                    command: table.command,
                    severity: table.severity,
                },
            );
        }

        let mut alertees = BTreeMap::new();
        for (name, raw_channels) in self.alertees {
            let mut alertee = Alertee::new();
            for (channel_name, RawChannelEntry(destination, raw_mask)) in raw_channels {
                let channel: Channel = channel_name.parse()?;
                let mask = raw_mask.to_mask()?;
                alertee
                    .channels
                    .insert(channel, ChannelTarget::new(destination, mask));
            }
            alertees.insert(name, alertee);
        }

        let directory = Directory::new(self.groups, alertees);
        directory.validate()?;

        Ok(Config {
            state_dir: self
                .settings
                .state_dir
                .unwrap_or_else(default_state_dir),
            channels: self.channels.to_commands(),
            checks,
            directory,
        })
    }
}

/// Default event-log directory
pub fn default_state_dir() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join("alerter").join("events"))
        .unwrap_or_else(|| PathBuf::from("alerter-state"))
}
