//! Service layer for check execution
//!
//! Services encapsulate the business logic of running a pass: invoking
//! checks, recording outcomes, and routing notifications.

pub mod runner;

pub use runner::{CheckRunner, PassSummary};
