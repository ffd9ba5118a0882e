//! File-backed event log store
//!
//! One JSON file per check under the state directory. The filename is the
//! check's storage slug; a missing file reads as an empty log. Appends are
//! read-modify-write, which is safe under the single-runner deployment model.

use super::EventStore;
use crate::domain::{AlertEvent, CheckId};
use crate::error::StoreError;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// One serialized log entry
///
/// The `check` field repeats the log's own key so a stray file can be traced
/// back to its check; `status` is 1 for pass, 0 for fail.
#[derive(Debug, Serialize, Deserialize)]
struct EventRecord {
    ts: i64,
    status: u8,
    check: String,
}

impl EventRecord {
    fn new(check: &CheckId, event: AlertEvent) -> Self {
        Self {
            ts: event.ts,
            status: u8::from(event.status),
            check: check.as_str().to_string(),
        }
    }

    fn to_event(&self) -> AlertEvent {
        AlertEvent::new(self.ts, self.status != 0)
    }
}

/// File-backed event store
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::DirUnavailable {
            dir: dir.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { dir })
    }

    /// Path of the log file for a check
    pub fn log_path(&self, check: &CheckId) -> PathBuf {
        self.dir.join(format!("{}.json", check.slug()))
    }

    fn load_records(&self, check: &CheckId) -> Result<Vec<EventRecord>, StoreError> {
        let path = self.log_path(check);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::ReadFailed {
                    check: check.to_string(),
                    message: e.to_string(),
                })
            }
        };

        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            check: check.to_string(),
            message: e.to_string(),
        })
    }

    fn save_records(&self, check: &CheckId, records: &[EventRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records).map_err(|e| StoreError::WriteFailed {
            check: check.to_string(),
            message: e.to_string(),
        })?;
        fs::write(self.log_path(check), json).map_err(|e| StoreError::WriteFailed {
            check: check.to_string(),
            message: e.to_string(),
        })
    }
}

impl EventStore for FileStore {
    fn append(&self, check: &CheckId, event: AlertEvent) -> Result<(), StoreError> {
        let mut records = self.load_records(check)?;
        records.push(EventRecord::new(check, event));
        self.save_records(check, &records)
    }

    fn read_all(&self, check: &CheckId) -> Result<Vec<AlertEvent>, StoreError> {
        Ok(self
            .load_records(check)?
            .iter()
            .map(EventRecord::to_event)
            .collect())
    }

    fn reset(&self, check: &CheckId) -> Result<(), StoreError> {
        match fs::remove_file(self.log_path(check)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::ResetFailed {
                check: check.to_string(),
                message: e.to_string(),
            }),
        }
    }
}
