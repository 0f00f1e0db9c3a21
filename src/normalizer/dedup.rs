//! Time-windowed duplicate suppression for transcript entries.
//!
//! The vendor SDK frequently emits the same utterance twice (once as a
//! `message` transcript event and once via `user-speech-end`), so entries with
//! an identical role + text seen within a short window are discarded.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::models::Role;

/// Two identical utterances within this window are treated as one.
pub const DEDUP_WINDOW: Duration = Duration::from_millis(1500);

/// Dedup keys are truncated to this many bytes to keep the table small.
const MAX_KEY_BYTES: usize = 1200;

/// Table size at which stale entries are opportunistically evicted.
const COMPACT_THRESHOLD: usize = 400;

/// Capacity/age-bounded map from dedup key to last-seen instant.
///
/// Cleanup is opportunistic: once the table outgrows [`COMPACT_THRESHOLD`],
/// entries older than four windows are evicted on the next insert. That bound
/// is a performance heuristic, not a correctness requirement.
#[derive(Debug)]
pub struct DedupWindow {
    window: Duration,
    recent: HashMap<String, Instant>,
}

impl Default for DedupWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl DedupWindow {
    pub fn new() -> Self {
        Self::with_window(DEDUP_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        Self { window, recent: HashMap::new() }
    }

    /// Returns true iff an identical `(role, text)` was recorded within the
    /// window; otherwise records the pair and returns false. Empty or
    /// whitespace-only text never registers a key and is never a duplicate.
    pub fn is_duplicate(&mut self, role: Role, text: &str) -> bool {
        self.is_duplicate_at(role, text, Instant::now())
    }

    /// Clock-explicit variant of [`is_duplicate`](Self::is_duplicate), used by
    /// tests to exercise the window without sleeping.
    pub fn is_duplicate_at(&mut self, role: Role, text: &str, now: Instant) -> bool {
        let Some(key) = dedup_key(role, text) else {
            return false;
        };

        if let Some(prev) = self.recent.get(&key)
            && now.duration_since(*prev) < self.window
        {
            return true;
        }
        self.recent.insert(key, now);

        if self.recent.len() > COMPACT_THRESHOLD {
            let max_age = self.window * 4;
            self.recent.retain(|_, seen| now.duration_since(*seen) <= max_age);
        }

        false
    }

    /// Number of keys currently tracked.
    pub fn tracked(&self) -> usize {
        self.recent.len()
    }
}

/// Build the dedup key: `role|text` with whitespace collapsed to single
/// spaces, trimmed, truncated to a bounded length. Returns None for text with
/// no content, which must never be deduplicated.
fn dedup_key(role: Role, text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let collapsed = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut key = format!("{}|{}", role.as_str(), collapsed);
    if key.len() > MAX_KEY_BYTES {
        let mut cut = MAX_KEY_BYTES;
        while !key.is_char_boundary(cut) {
            cut -= 1;
        }
        key.truncate(cut);
    }
    Some(key)
}
