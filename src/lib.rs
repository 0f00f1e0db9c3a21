//! MediVoice Transcript - normalize voice-call transcripts and persist call history
//!
//! This library is the transcript core of a voice-assistant demo: it turns the
//! heterogeneous events emitted by a voice-call SDK into canonical transcript
//! messages and keeps a bounded, file-backed history of completed calls. It
//! supports:
//!
//! - Normalizing `(sender, text, role)` inputs and free-form SDK payloads into
//!   [`TranscriptMessage`] records with a fixed role-resolution precedence
//! - Suppressing duplicate utterances emitted twice within a short window
//! - Driving a [`CallSession`] from SDK lifecycle and content events
//! - Persisting up to 50 completed [`CallRecord`]s, newest first, rewritten
//!   in full on every mutation
//!
//! # Example
//!
//! ```
//! use medivoice_transcript::{CallSession, SdkEvent};
//!
//! let mut session = CallSession::start();
//! session.handle_event(SdkEvent::UserSpeechEnd { text: "I have a headache".into() });
//! let finished = session.end();
//! assert_eq!(finished.conversation[1].sender, "You");
//! ```

pub mod cli;
pub mod history;
pub mod models;
pub mod normalizer;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use history::{HistoryStore, MAX_RECORDS};
pub use models::{CallRecord, Role, TranscriptMessage};
pub use normalizer::{DedupWindow, normalize_message};
pub use session::{CallSession, CallState, CallStatus, FinishedCall, SdkEvent};
