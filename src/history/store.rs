//! Durable call history: a bounded, newest-first sequence of completed calls,
//! rewritten in full on every mutation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, Utc};

use crate::models::{CallRecord, TranscriptMessage};

/// Oldest records are evicted past this count.
pub const MAX_RECORDS: usize = 50;

/// File name of the history store inside the data directory.
pub const HISTORY_FILENAME: &str = "call-history.json";

/// Load-once, rewrite-on-mutation store of completed calls.
///
/// Persistence is best-effort: a failed write leaves the in-memory sequence
/// authoritative for the current session and is reported on stderr only,
/// matching the convenience (not safety-critical) nature of call history.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    records: Vec<CallRecord>,
}

impl HistoryStore {
    /// Read the full stored sequence. A missing file or corrupt JSON yields an
    /// empty store; neither is an error for the caller.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(records) => records,
                Err(e) => {
                    eprintln!(
                        "Warning: ignoring corrupt call history at {}: {}",
                        path.display(),
                        e
                    );
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self { path, records }
    }

    /// Flush a completed conversation into history. An empty conversation does
    /// not create a record and leaves the store untouched.
    ///
    /// The record id is creation-time based (Unix milliseconds) but bumped
    /// past the current newest id, so ids are strictly increasing even when
    /// two calls end within the same millisecond.
    pub fn finalize_call(
        &mut self,
        conversation: Vec<TranscriptMessage>,
        duration: &str,
    ) -> Option<&CallRecord> {
        if conversation.is_empty() {
            return None;
        }

        let mut id = Utc::now().timestamp_millis();
        if let Some(newest) = self.records.first()
            && id <= newest.id
        {
            id = newest.id + 1;
        }

        let record = CallRecord {
            id,
            date: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            duration: duration.to_string(),
            conversation,
        };

        self.records.insert(0, record);
        self.records.truncate(MAX_RECORDS);
        self.persist();
        self.records.first()
    }

    /// Remove the record with a matching id. Absent ids are a no-op, not an
    /// error. Returns whether anything was removed.
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        let removed = self.records.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Drop the entire history. Irreversible; callers are expected to have
    /// confirmed intent with the user.
    pub fn clear(&mut self) {
        self.records.clear();
        self.persist();
    }

    /// Stored calls, newest first.
    pub fn records(&self) -> &[CallRecord] {
        &self.records
    }

    pub fn get(&self, id: i64) -> Option<&CallRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) {
        if let Err(e) = self.write_to_disk() {
            eprintln!(
                "Warning: failed to persist call history to {}: {:#}",
                self.path.display(),
                e
            );
        }
    }

    /// Rewrite the whole sequence atomically (temp file + rename).
    fn write_to_disk(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).context("Failed to create history directory")?;
        }

        let json = serde_json::to_string_pretty(&self.records)
            .context("Failed to serialize call history")?;
        let temp = self.path.with_extension("json.tmp");
        fs::write(&temp, json).context("Failed to write history temp file")?;
        fs::rename(&temp, &self.path).context("Failed to rename history temp file")?;
        Ok(())
    }
}
