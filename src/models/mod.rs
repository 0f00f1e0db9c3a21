//! Data models for call transcripts and history.
//!
//! This module defines the data structures used throughout the application:
//!
//! - [`TranscriptMessage`] - a single normalized transcript entry
//! - [`Role`] - the canonical speaker category (`user` / `ai` / `system`)
//! - [`CallRecord`] - a completed call as persisted in the history file
//!
//! These models use serde for the persisted JSON layout; note that a
//! message's role is stored under the JSON key `type`.

pub mod call;
pub mod message;

pub use call::CallRecord;
pub use message::{Role, TranscriptMessage};
