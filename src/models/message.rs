use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical speaker category. There is no "unknown" at rest: payloads that
/// cannot be classified are defaulted to [`Role::Ai`] before a message is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Ai,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Ai => "ai",
            Role::System => "system",
        }
    }

    /// Default display label for the role when the caller supplied none.
    pub fn default_label(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Ai => "AI Assistant",
            Role::System => "System",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single normalized transcript entry.
///
/// The `role` field is persisted under the JSON key `type` to match the
/// on-disk history layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptMessage {
    pub sender: String,
    pub text: String,
    #[serde(rename = "type")]
    pub role: Role,
    pub timestamp: DateTime<Utc>,
}

impl TranscriptMessage {
    pub fn new(sender: impl Into<String>, text: impl Into<String>, role: Role) -> Self {
        Self { sender: sender.into(), text: text.into(), role, timestamp: Utc::now() }
    }
}
