//! Canonical request record
//!
//! A [`PatternRequest`] is born when one message is resolved and dies once
//! handed to (or rejected before reaching) the external processor; it is
//! never shared across invocations.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Canonical, validated record produced by parsing one input message
///
/// Fixed slots carry the fields with distinct validation and defaulting
/// rules; anything else the scanner captured lands in
/// [`extra`](PatternRequest::extra) untouched, so callers can observe
/// metadata the resolver does not know about.
///
/// All string slots are trimmed on finalization. `code` keeps its internal
/// line formatting verbatim and is only trimmed at the outer boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRequest {
    /// Canonical pattern name (post alias table)
    pub pattern: String,
    /// Canonical language display name; defaults to `"Python"`
    pub language: String,
    /// Fenced code content, internal formatting preserved
    pub code: Option<String>,
    /// Task description
    pub task: Option<String>,
    /// Issue description (bug reports)
    pub issue: Option<String>,
    /// Extra rules or constraints
    pub rules: Option<String>,
    /// Free-form prompt (custom pattern)
    pub prompt: Option<String>,
    /// Question text (query patterns)
    pub question: Option<String>,
    /// Word form to analyze (Latin patterns)
    pub word_form: Option<String>,
    /// Prose captured after a code fence
    pub explanation: Option<String>,
    /// Explicitly declared processor, if any
    pub processor: Option<String>,
    /// Passthrough fields not covered by a fixed slot
    pub extra: IndexMap<String, String>,
}

/// Field keys owned by the fixed slots
pub const SLOT_KEYS: &[&str] = &[
    "pattern",
    "language",
    "code",
    "task",
    "issue",
    "rules",
    "prompt",
    "question",
    "word_form",
    "explanation",
    "processor",
];

impl PatternRequest {
    /// Look up a field by name, covering both fixed slots and passthrough
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        let slot = match name {
            "pattern" => return Some(&self.pattern),
            "language" => return Some(&self.language),
            "code" => &self.code,
            "task" => &self.task,
            "issue" => &self.issue,
            "rules" => &self.rules,
            "prompt" => &self.prompt,
            "question" => &self.question,
            "word_form" => &self.word_form,
            "explanation" => &self.explanation,
            "processor" => &self.processor,
            other => return self.extra.get(other).map(String::as_str),
        };
        slot.as_deref()
    }

    /// Check whether a field is present with non-empty content
    #[inline]
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some_and(|v| !v.trim().is_empty())
    }
}

/// Successful routing outcome: the processor to dispatch to and the
/// finalized request it should execute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routed {
    /// Name of the selected processor
    pub processor: String,
    /// The finalized request
    pub request: PatternRequest,
}
