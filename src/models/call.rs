use serde::{Deserialize, Serialize};

use super::{Role, TranscriptMessage};

/// A completed call, created exactly once when a call ends and immutable
/// thereafter except for deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Creation-time based id (Unix milliseconds), strictly increasing across
    /// records so it can serve as a stable deletion/lookup key.
    pub id: i64,
    /// Human-readable creation timestamp.
    pub date: String,
    /// Elapsed call time, `MM:SS`.
    pub duration: String,
    /// Messages in insertion order, preserved verbatim.
    pub conversation: Vec<TranscriptMessage>,
}

impl CallRecord {
    /// Message count excluding system notices, as shown in history listings.
    pub fn spoken_message_count(&self) -> usize {
        self.conversation.iter().filter(|m| m.role != Role::System).count()
    }
}
