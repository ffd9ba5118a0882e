//! Alert group and recipient directory
//!
//! Groups name sets of alertees; checks name sets of groups. Resolution
//! unions and deduplicates, and every cross-reference is validated once at
//! load so fan-out never discovers a dangling name mid-alert.

use crate::channel::Channel;
use crate::domain::SeverityMask;
use crate::error::ConfigError;

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One channel subscription for an alertee
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelTarget {
    /// Address or number to deliver to
    pub destination: String,
    /// Severities this subscription wants
    pub mask: SeverityMask,
}

impl ChannelTarget {
    /// Create a subscription
    pub fn new(destination: impl Into<String>, mask: SeverityMask) -> Self {
        Self {
            destination: destination.into(),
            mask,
        }
    }
}

/// A notification recipient with per-channel subscriptions
///
/// A channel appears at most once per alertee; the map keeps dispatch order
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Alertee {
    /// Channel subscriptions
    pub channels: BTreeMap<Channel, ChannelTarget>,
}

impl Alertee {
    /// Create an alertee with no subscriptions
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a channel subscription
    pub fn with_channel(mut self, channel: Channel, target: ChannelTarget) -> Self {
        self.channels.insert(channel, target);
        self
    }
}

/// Groups and alertees, validated once at load
#[derive(Debug, Clone, Default)]
pub struct Directory {
    groups: BTreeMap<String, Vec<String>>,
    alertees: BTreeMap<String, Alertee>,
}

impl Directory {
    /// Create a directory from raw maps
    pub fn new(groups: BTreeMap<String, Vec<String>>, alertees: BTreeMap<String, Alertee>) -> Self {
        Self { groups, alertees }
    }

    /// Whether a group is configured
    pub fn has_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Look up an alertee by name
    pub fn alertee(&self, name: &str) -> Option<&Alertee> {
        self.alertees.get(name)
    }

    /// Number of configured groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of configured alertees
    pub fn alertee_count(&self) -> usize {
        self.alertees.len()
    }

    /// Check that every group member is a configured alertee
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (group, members) in &self.groups {
            for member in members {
                if !self.alertees.contains_key(member) {
                    return Err(ConfigError::UnknownAlertee {
                        group: group.clone(),
                        alertee: member.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Union of alertee names across the given groups, deduplicated
    pub fn resolve(&self, groups: &[String]) -> Result<BTreeSet<String>, ConfigError> {
        let mut names = BTreeSet::new();
        for group in groups {
            let members = self
                .groups
                .get(group)
                .ok_or_else(|| ConfigError::UnknownGroup(group.clone()))?;
            names.extend(members.iter().cloned());
        }
        Ok(names)
    }

    /// Resolve group names into the alertees themselves
    pub fn resolve_alertees(&self, groups: &[String]) -> Result<Vec<(&String, &Alertee)>, ConfigError> {
        let names = self.resolve(groups)?;
        let mut result = Vec::with_capacity(names.len());
        for name in &names {
            let (key, alertee) = self.alertees.get_key_value(name).ok_or_else(|| {
                let group = groups
                    .iter()
                    .find(|g| {
                        self.groups
                            .get(g.as_str())
                            .map_or(false, |members| members.contains(name))
                    })
                    .cloned()
                    .unwrap_or_default();
                ConfigError::UnknownAlertee {
                    group,
                    alertee: name.clone(),
                }
            })?;
            result.push((key, alertee));
        }
        Ok(result)
    }
}
