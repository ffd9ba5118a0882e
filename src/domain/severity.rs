//! Severity levels and recipient subscription masks
//!
//! Each severity carries a distinct bit so recipients can subscribe to any
//! combination of levels per channel.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

/// Alert severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, no urgent action needed
    Notice = 1,
    /// Attention recommended
    Warning = 2,
    /// Action required now
    Critical = 4,
}

impl Severity {
    /// Bit value used in subscription masks
    #[inline]
    pub const fn bit(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Notice => write!(f, "NOTICE"),
            Self::Warning => write!(f, "WARNING"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl FromStr for Severity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "notice" => Ok(Self::Notice),
            "warning" => Ok(Self::Warning),
            "critical" => Ok(Self::Critical),
            other => Err(ConfigError::InvalidValue {
                key: "severity".to_string(),
                message: format!(
                    "unknown severity '{}' (expected notice, warning, or critical)",
                    other
                ),
            }),
        }
    }
}

/// Bitmask of severities a recipient subscribes to on one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeverityMask(u8);

impl SeverityMask {
    /// Mask matching every severity
    pub const ALL: Self = Self(7);

    /// Mask matching nothing
    pub const NONE: Self = Self(0);

    /// Create a mask from raw bits (maximum 7)
    pub fn from_bits(bits: u8) -> Result<Self, ConfigError> {
        if bits > Self::ALL.0 {
            return Err(ConfigError::InvalidValue {
                key: "mask".to_string(),
                message: format!("mask {} out of range (maximum 7)", bits),
            });
        }
        Ok(Self(bits))
    }

    /// Raw mask bits
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether alerts at this severity pass the mask
    #[inline]
    pub const fn matches(self, severity: Severity) -> bool {
        self.0 & severity.bit() != 0
    }
}

impl From<Severity> for SeverityMask {
    fn from(severity: Severity) -> Self {
        Self(severity.bit())
    }
}

impl BitOr<Severity> for SeverityMask {
    type Output = Self;

    fn bitor(self, rhs: Severity) -> Self {
        Self(self.0 | rhs.bit())
    }
}

impl BitOr for SeverityMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for SeverityMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "none");
        }

        let mut first = true;
        for severity in [Severity::Notice, Severity::Warning, Severity::Critical] {
            if self.matches(severity) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{}", severity.to_string().to_lowercase())?;
                first = false;
            }
        }
        Ok(())
    }
}
