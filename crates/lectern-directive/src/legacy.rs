//! Legacy keyword fallback
//!
//! Older callers (and old conversation history) request work with bare
//! keywords instead of directive headers: `"write_code in python: sum a
//! list"`. This detector recognizes those messages with a fixed-priority
//! substring scan. It only runs when the header scanner came up empty.

use crate::fields::FieldBag;
use crate::language::{canonical_language, find_language_token, is_supported, DEFAULT_LANGUAGE};
use tracing::debug;

/// Fence marker for code blocks
const FENCE: &str = "```";

/// Fallback issue text when no issue marker is present
const UNKNOWN_ISSUE: &str = "Unknown issue";

// Priority-ordered keyword triggers. First match wins; no scoring.
const KEYWORD_TRIGGERS: &[(&str, &[&str])] = &[
    ("write_code", &["write_code"]),
    ("refactor_code", &["refactor_code"]),
    ("write_test", &["write_test"]),
    ("fix_bug", &["fix_bug", "fix this"]),
    ("explain_code", &["explain_code"]),
    ("add_docs", &["add_docs"]),
];

/// Keyword-based fallback detector
///
/// Produces the same [`FieldBag`] shape as the header scanner so both
/// paths flow through one resolver; pattern names are left raw here and
/// canonicalized by the resolver's alias table.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyKeywordDetector;

impl LegacyKeywordDetector {
    /// Create new detector
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Detect a keyword-style request in free text
    ///
    /// Returns `None` when no known keyword appears; the caller then treats
    /// the message as an unclassified/custom request.
    #[must_use]
    pub fn detect(&self, text: &str) -> Option<FieldBag> {
        let lower = text.to_lowercase();

        let (pattern, trigger) = KEYWORD_TRIGGERS.iter().find_map(|(pattern, triggers)| {
            triggers
                .iter()
                .find(|t| lower.contains(*t))
                .map(|t| (*pattern, *t))
        })?;
        debug!(pattern, trigger, "legacy keyword match");

        let mut bag = FieldBag::new();
        bag.set("pattern", pattern);

        let fence = first_fenced_block(text);
        if let Some((_, content)) = &fence {
            bag.set("code", content.clone());
        }
        bag.set("language", detect_language(&lower, fence.as_ref()));

        match pattern {
            "fix_bug" => bag.set("issue", extract_issue(text)),
            "write_code" => {
                if let Some(task) = extract_task(text, trigger) {
                    bag.set("task", task);
                }
            }
            _ => {}
        }

        Some(bag)
    }
}

/// Pick the language: fence tag if supported, else first mention in the
/// text, else the default.
fn detect_language(lower: &str, fence: Option<&(Option<String>, String)>) -> String {
    if let Some((Some(tag), _)) = fence {
        if is_supported(tag) {
            return canonical_language(tag);
        }
    }
    find_language_token(lower).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}

/// First fenced code block in the text: `(language tag, verbatim content)`
fn first_fenced_block(text: &str) -> Option<(Option<String>, String)> {
    let mut lines = text.lines();
    let tag = loop {
        let line = lines.next()?.trim();
        if let Some(rest) = line.strip_prefix(FENCE) {
            let rest = rest.trim();
            break (!rest.is_empty()).then(|| rest.to_string());
        }
    };

    let mut content = Vec::new();
    for line in lines {
        if line.trim().starts_with(FENCE) {
            break;
        }
        content.push(line);
    }
    Some((tag, content.join("\n")))
}

/// Task text for `write_code`: everything after the first `:` following
/// the trigger, else the remainder of the message after the trigger.
///
/// The trigger is located case-insensitively but the task is sliced from
/// the original text, so the user's casing survives.
fn extract_task(text: &str, trigger: &str) -> Option<String> {
    let start = find_ascii_case_insensitive(text, trigger)? + trigger.len();
    let rest = &text[start..];
    let task = match rest.find(':') {
        Some(colon) => &rest[colon + 1..],
        None => rest,
    };
    let task = task.trim();
    (!task.is_empty()).then(|| task.to_string())
}

/// Byte offset of the first case-insensitive match of an ASCII needle
///
/// Matched bytes are necessarily ASCII, so the returned offset and the
/// end of the match both land on char boundaries of `haystack`.
fn find_ascii_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

/// Issue text for `fix_bug`: after an issue marker, up to the next header
/// or fence; `"Unknown issue"` when no marker is present.
fn extract_issue(text: &str) -> String {
    const MARKERS: &[&str] = &["### Issue:", "The issue is:"];

    let start = MARKERS
        .iter()
        .find_map(|m| text.find(m).map(|i| i + m.len()));
    let Some(start) = start else {
        return UNKNOWN_ISSUE.to_string();
    };

    let rest = &text[start..];

    // Walk real byte offsets so CRLF endings and multi-byte characters
    // never skew the slice boundary.
    let mut end = rest.len();
    let mut offset = 0;
    for (i, segment) in rest.split_inclusive('\n').enumerate() {
        let line = segment.trim();
        // The marker's own line never terminates the issue.
        if i > 0 && (line.starts_with("###") || line.starts_with(FENCE)) {
            end = offset;
            break;
        }
        offset += segment.len();
    }

    let issue = rest[..end].trim();
    if issue.is_empty() {
        UNKNOWN_ISSUE.to_string()
    } else {
        issue.to_string()
    }
}
