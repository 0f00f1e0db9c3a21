//! Role and text extraction from free-form vendor SDK message payloads.
//!
//! The SDK does not document a stable message shape, so the speaker is
//! inferred by duck-typing: a fixed-priority list of role-bearing fields is
//! tried in order, each matched with substring heuristics. New payload shapes
//! are handled by extending [`ROLE_EXTRACTORS`], not the control flow.

use serde_json::Value;

use crate::models::Role;

/// One role-bearing field group: the first present field is classified with
/// the group's hint lists.
struct RoleExtractor {
    fields: &'static [&'static str],
    user_hints: &'static [&'static str],
    ai_hints: &'static [&'static str],
}

/// Tried in priority order: `speaker`, then `role`, then `from`/`source`/`origin`.
const ROLE_EXTRACTORS: &[RoleExtractor] = &[
    RoleExtractor {
        fields: &["speaker"],
        user_hints: &["user", "human"],
        ai_hints: &["assistant", "ai", "bot"],
    },
    RoleExtractor {
        fields: &["role"],
        user_hints: &["user"],
        ai_hints: &["assistant", "ai", "agent", "bot"],
    },
    RoleExtractor {
        fields: &["from", "source", "origin"],
        user_hints: &["user", "human"],
        ai_hints: &["assistant", "ai", "agent"],
    },
];

fn classify(value: &str, extractor: &RoleExtractor) -> Option<Role> {
    let value = value.to_lowercase();
    if value == "you" || extractor.user_hints.iter().any(|hint| value.contains(hint)) {
        return Some(Role::User);
    }
    if extractor.ai_hints.iter().any(|hint| value.contains(hint)) {
        return Some(Role::Ai);
    }
    if value.contains("system") {
        return Some(Role::System);
    }
    None
}

/// Infer the speaker role from a vendor payload.
///
/// Returns None when no field yields a match; callers default to [`Role::Ai`]
/// before normalization. That fallback is a heuristic (most ambiguous
/// transcript events originate from the assistant stream), not a guarantee.
pub fn infer_role(payload: &Value) -> Option<Role> {
    for extractor in ROLE_EXTRACTORS {
        let field = extractor
            .fields
            .iter()
            .find_map(|field| payload.get(field).and_then(Value::as_str))
            .filter(|value| !value.is_empty());
        if let Some(value) = field
            && let Some(role) = classify(value, extractor)
        {
            return Some(role);
        }
    }
    None
}

/// Pull the utterance text out of a vendor payload: first non-empty of
/// `transcript`, then `text`, trimmed. None means the event carries nothing
/// worth rendering and should be dropped.
pub fn extract_text(payload: &Value) -> Option<String> {
    ["transcript", "text"]
        .iter()
        .filter_map(|field| payload.get(*field).and_then(Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}
