//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use medivoice_transcript::history::HISTORY_FILENAME;
use medivoice_transcript::models::{CallRecord, Role, TranscriptMessage};
use tempfile::TempDir;

/// Builder for a scratch data directory holding a call history file.
pub struct HistoryDirBuilder {
    temp_dir: TempDir,
}

impl HistoryDirBuilder {
    /// Create a builder with an empty data directory (no history file).
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Path to the data directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path to the history file inside the data directory.
    pub fn history_path(&self) -> PathBuf {
        self.temp_dir.path().join(HISTORY_FILENAME)
    }

    /// Write raw bytes as the history file (for corruption tests).
    pub fn with_raw_history(self, content: &str) -> Self {
        fs::write(self.history_path(), content).expect("Failed to write history file");
        self
    }

    /// Write the given records as the history file.
    pub fn with_records(self, records: &[CallRecord]) -> Self {
        let json = serde_json::to_string_pretty(records).expect("Failed to serialize records");
        self.with_raw_history(&json)
    }
}

impl Default for HistoryDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A minimal stored call with the given id and one user message.
pub fn call_record(id: i64, text: &str) -> CallRecord {
    CallRecord {
        id,
        date: "2026-08-28 09:00:00".to_string(),
        duration: "00:42".to_string(),
        conversation: vec![TranscriptMessage {
            sender: "You".to_string(),
            text: text.to_string(),
            role: Role::User,
            timestamp: Utc::now(),
        }],
    }
}

/// Write a JSONL event log into the directory and return its path.
pub fn write_event_log(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, lines.join("\n")).expect("Failed to write event log");
    path
}
