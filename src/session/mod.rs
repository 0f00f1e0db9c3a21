//! Call session state.
//!
//! A [`CallSession`] owns everything that is alive only while a call is in
//! progress: the conversation buffer, the duplicate-suppression window, the
//! start instant, and the current status line. It is constructed at
//! `call-start`, fed [`SdkEvent`]s as they arrive, and consumed by
//! [`CallSession::end`] when the call finishes.

use std::time::{Duration, Instant};

use serde::Deserialize;
use serde_json::Value;

use crate::models::{Role, TranscriptMessage};
use crate::normalizer::{DedupWindow, extract_text, infer_role, normalize_message};
use crate::utils::format_duration;

const CALL_STARTED_NOTICE: &str = "Call started with MediVoice AI Assistant";
const CALL_ENDED_NOTICE: &str = "Call ended";

/// Connection state shown next to the status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Online,
    Calling,
    Offline,
}

/// Status line pushed to the view on lifecycle changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallStatus {
    pub text: String,
    pub state: CallState,
}

/// Inbound notifications from the call-transport SDK, in the tagged JSON form
/// used by event logs: `{"event":"message", ...payload}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum SdkEvent {
    CallStart,
    CallEnd,
    Message {
        #[serde(flatten)]
        payload: Value,
    },
    UserSpeechEnd {
        text: String,
    },
    Error {
        #[serde(default)]
        message: Option<String>,
    },
}

/// A completed call, ready to be handed to the history store.
#[derive(Debug, Clone)]
pub struct FinishedCall {
    pub conversation: Vec<TranscriptMessage>,
    pub duration: String,
}

/// State owned by one in-progress call.
#[derive(Debug)]
pub struct CallSession {
    started: Instant,
    conversation: Vec<TranscriptMessage>,
    dedup: DedupWindow,
    status: CallStatus,
}

impl CallSession {
    /// Begin a call: status goes to `Calling` and the opening system notice is
    /// appended to the transcript.
    pub fn start() -> Self {
        let mut session = Self {
            started: Instant::now(),
            conversation: Vec::new(),
            dedup: DedupWindow::new(),
            status: CallStatus {
                text: "Call in progress...".to_string(),
                state: CallState::Calling,
            },
        };
        session.push(Some("System"), CALL_STARTED_NOTICE, Some("system"));
        session
    }

    /// Normalize and append one message. Empty or whitespace-only text is a
    /// no-op. Returns the appended message so a view layer can render it.
    pub fn push(
        &mut self,
        sender_or_label: Option<&str>,
        text: &str,
        role: Option<&str>,
    ) -> Option<&TranscriptMessage> {
        if text.trim().is_empty() {
            return None;
        }
        let message = normalize_message(sender_or_label, text, role);
        self.conversation.push(message);
        self.conversation.last()
    }

    /// Consume one SDK notification. Messages with no usable text are
    /// dropped; duplicates within the dedup window are discarded. A payload
    /// with no recognizable role field is attributed to the assistant, which
    /// is a heuristic rather than a guarantee.
    pub fn handle_event(&mut self, event: SdkEvent) {
        match event {
            // Lifecycle boundaries are owned by the caller: the session is
            // created at call-start and consumed via end() at call-end.
            SdkEvent::CallStart => {}
            SdkEvent::CallEnd => {
                self.status =
                    CallStatus { text: "Call ended".to_string(), state: CallState::Offline };
            }
            SdkEvent::Message { payload } => {
                let Some(text) = extract_text(&payload) else {
                    return;
                };
                let role = infer_role(&payload).unwrap_or(Role::Ai);
                if self.dedup.is_duplicate(role, &text) {
                    return;
                }
                self.push(Some(role.default_label()), &text, Some(role.as_str()));
            }
            SdkEvent::UserSpeechEnd { text } => {
                let text = text.trim();
                if text.is_empty() || self.dedup.is_duplicate(Role::User, text) {
                    return;
                }
                self.push(Some("You"), text, Some("user"));
            }
            SdkEvent::Error { message } => {
                self.status = CallStatus {
                    text: format!("Error: {}", message.as_deref().unwrap_or("unknown")),
                    state: CallState::Offline,
                };
            }
        }
    }

    pub fn status(&self) -> &CallStatus {
        &self.status
    }

    pub fn conversation(&self) -> &[TranscriptMessage] {
        &self.conversation
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Elapsed call time as `MM:SS`, recomputed by the view's one-second tick.
    pub fn elapsed_display(&self) -> String {
        format_duration(self.elapsed())
    }

    /// End the call: append the closing system notice and hand the
    /// conversation and final duration over for finalization. Consuming the
    /// session is what deterministically stops any elapsed-time display.
    pub fn end(mut self) -> FinishedCall {
        self.push(Some("System"), CALL_ENDED_NOTICE, Some("system"));
        let duration = self.elapsed_display();
        FinishedCall { conversation: self.conversation, duration }
    }
}
