//! Persistent event log storage
//!
//! One ordered pass/fail history per check, behind a capability trait so the
//! engine, tests, and embedders can swap backends.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::domain::{AlertEvent, CheckId};
use crate::error::StoreError;

/// Event log storage capability
pub trait EventStore: Send + Sync {
    /// Append one event to the end of a check's log
    fn append(&self, check: &CheckId, event: AlertEvent) -> Result<(), StoreError>;

    /// Read a check's full log in insertion order
    ///
    /// An absent log reads as empty, never as an error.
    fn read_all(&self, check: &CheckId) -> Result<Vec<AlertEvent>, StoreError>;

    /// Delete a check's log
    ///
    /// Deleting an absent log is a no-op, so resets are idempotent.
    fn reset(&self, check: &CheckId) -> Result<(), StoreError>;

    /// Whether the check's log contains any failure
    ///
    /// Successes are only recorded on top of existing failures, so a
    /// non-empty log always contains one.
    fn has_failures(&self, check: &CheckId) -> Result<bool, StoreError> {
        Ok(!self.read_all(check)?.is_empty())
    }
}
