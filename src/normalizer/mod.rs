//! Transcript normalization: map heterogeneous inputs (explicit role-labeled
//! calls or free-form vendor SDK payloads) to canonical [`TranscriptMessage`]
//! records, and suppress near-simultaneous duplicate utterances.

pub mod dedup;
pub mod payload;

pub use dedup::{DEDUP_WINDOW, DedupWindow};
pub use payload::{extract_text, infer_role};

use crate::models::{Role, TranscriptMessage};

/// Resolve the speaker role for a message.
///
/// Precedence, first match wins:
/// 1. An explicit role string, if recognized (`user`, `ai`/`assistant`,
///    `system`, case-insensitive).
/// 2. A lexical heuristic on the sender label: a label containing `you`,
///    `user`, or `patient` (case-insensitive) is the user; anything else is
///    assumed to be the assistant.
pub fn resolve_role(sender_or_label: &str, explicit: Option<&str>) -> Role {
    if let Some(role) = explicit {
        match role.to_lowercase().as_str() {
            "user" => return Role::User,
            "ai" | "assistant" => return Role::Ai,
            "system" => return Role::System,
            _ => {}
        }
    }

    let label = sender_or_label.to_lowercase();
    if label.contains("you") || label.contains("user") || label.contains("patient") {
        Role::User
    } else {
        Role::Ai
    }
}

/// Normalize the display label after role resolution.
///
/// User messages show `"You"` unless a distinct non-empty custom label was
/// supplied; assistant messages are always labeled `"AI Assistant"`; system
/// messages keep their original label, falling back to `"System"`.
fn display_label(sender_or_label: &str, role: Role) -> String {
    match role {
        Role::User if sender_or_label.is_empty() || sender_or_label == "You" => "You".to_string(),
        Role::User => sender_or_label.to_string(),
        Role::Ai => "AI Assistant".to_string(),
        Role::System if sender_or_label.is_empty() => "System".to_string(),
        Role::System => sender_or_label.to_string(),
    }
}

/// Build a canonical [`TranscriptMessage`] from free-form inputs.
///
/// The timestamp is the moment of normalization, not the moment the words were
/// spoken. Empty text still produces a message; callers filter emptiness
/// before appending to a conversation.
pub fn normalize_message(
    sender_or_label: Option<&str>,
    text: &str,
    role: Option<&str>,
) -> TranscriptMessage {
    let label = sender_or_label.unwrap_or("");
    let role = resolve_role(label, role);
    TranscriptMessage::new(display_label(label, role), text, role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_user_role_forces_you_label() {
        let msg = normalize_message(Some("You"), "I have a headache", Some("user"));
        assert_eq!(msg.sender, "You");
        assert_eq!(msg.text, "I have a headache");
        assert_eq!(msg.role, Role::User);
    }

    #[test]
    fn test_explicit_user_role_keeps_custom_label() {
        let msg = normalize_message(Some("Patient A"), "Hello", Some("user"));
        assert_eq!(msg.sender, "Patient A");
        assert_eq!(msg.role, Role::User);
    }

    #[test]
    fn test_assistant_role_always_relabeled() {
        let msg = normalize_message(None, "How can I help?", Some("assistant"));
        assert_eq!(msg.sender, "AI Assistant");
        assert_eq!(msg.role, Role::Ai);

        let msg = normalize_message(Some("Dr. Bot"), "Take two", Some("ai"));
        assert_eq!(msg.sender, "AI Assistant");
    }

    #[test]
    fn test_role_strings_are_case_insensitive() {
        assert_eq!(resolve_role("", Some("USER")), Role::User);
        assert_eq!(resolve_role("", Some("Assistant")), Role::Ai);
        assert_eq!(resolve_role("", Some("SyStEm")), Role::System);
    }

    #[test]
    fn test_unrecognized_role_falls_back_to_label_heuristic() {
        assert_eq!(resolve_role("Patient", Some("speaker-1")), Role::User);
        assert_eq!(resolve_role("Agent", Some("speaker-1")), Role::Ai);
    }

    #[test]
    fn test_label_heuristic_detects_user() {
        assert_eq!(resolve_role("You", None), Role::User);
        assert_eq!(resolve_role("the user", None), Role::User);
        assert_eq!(resolve_role("PATIENT", None), Role::User);
    }

    #[test]
    fn test_missing_role_and_neutral_label_defaults_to_ai() {
        let msg = normalize_message(None, "Yes", None);
        assert_eq!(msg.role, Role::Ai);
        assert_eq!(msg.sender, "AI Assistant");
    }

    #[test]
    fn test_system_label_fallback() {
        let msg = normalize_message(None, "Call started", Some("system"));
        assert_eq!(msg.sender, "System");

        let msg = normalize_message(Some("Scheduler"), "Reminder set", Some("system"));
        assert_eq!(msg.sender, "Scheduler");
    }
}
