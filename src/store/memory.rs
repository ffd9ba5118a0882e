//! In-memory event store for tests and embedding

use super::EventStore;
use crate::domain::{AlertEvent, CheckId};
use crate::error::StoreError;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// HashMap-backed store, keyed by check slug
#[derive(Debug, Default)]
pub struct MemoryStore {
    logs: Mutex<HashMap<String, Vec<AlertEvent>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn logs(&self) -> MutexGuard<'_, HashMap<String, Vec<AlertEvent>>> {
        // A panicking check can poison the lock mid-pass; the data is still fine
        self.logs.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl EventStore for MemoryStore {
    fn append(&self, check: &CheckId, event: AlertEvent) -> Result<(), StoreError> {
        self.logs().entry(check.slug()).or_default().push(event);
        Ok(())
    }

    fn read_all(&self, check: &CheckId) -> Result<Vec<AlertEvent>, StoreError> {
        Ok(self.logs().get(&check.slug()).cloned().unwrap_or_default())
    }

    fn reset(&self, check: &CheckId) -> Result<(), StoreError> {
        self.logs().remove(&check.slug());
        Ok(())
    }
}
