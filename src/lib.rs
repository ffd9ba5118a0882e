//! alerter - threshold-based health check alerting library
//!
//! This library provides the core functionality for running health
//! checks, tracking pass/fail history per check, and notifying alert
//! groups over email, SMS, and voice once failure thresholds are hit.
//!
//! # Modules
//!
//! - [`alerts`]: Threshold evaluation, recipient resolution, notification
//! - [`channel`]: Delivery channels and messengers
//! - [`checks`]: Check registration and command-backed checks
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Core domain types
//! - [`error`]: Error types
//! - [`services`]: Pass orchestration
//! - [`store`]: Persistent per-check event logs

pub mod alerts;
pub mod channel;
pub mod checks;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod store;

#[cfg(test)]
pub mod mock;

pub use error::{AppError, Result};
