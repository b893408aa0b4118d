//! Static processor and pattern registries
//!
//! Three read-only tables drive resolution and routing:
//!
//! - processor descriptors (declaration order matters for auto-selection)
//! - the pattern alias table (canonicalization, identity for known names)
//! - required fields per pattern
//!
//! The built-in registry is constructed once behind a `Lazy` and never
//! mutated; replacing registry contents at runtime means building a whole
//! new [`Registry`] value, never editing one in place.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A processor and the patterns it may execute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorDescriptor {
    /// Processor name (`code`, `latin`, ...)
    pub name: String,
    /// Patterns this processor accepts, canonical names
    pub allowed_patterns: Vec<String>,
}

impl ProcessorDescriptor {
    /// Create new descriptor
    #[must_use]
    pub fn new(name: impl Into<String>, allowed_patterns: &[&str]) -> Self {
        Self {
            name: name.into(),
            allowed_patterns: allowed_patterns.iter().map(ToString::to_string).collect(),
        }
    }

    /// Check whether this processor accepts `pattern`
    #[inline]
    #[must_use]
    pub fn allows(&self, pattern: &str) -> bool {
        self.allowed_patterns.iter().any(|p| p == pattern)
    }
}

/// Immutable registry of processors, aliases and field requirements
#[derive(Debug, Clone, Default)]
pub struct Registry {
    processors: Vec<ProcessorDescriptor>,
    aliases: HashMap<String, String>,
    requirements: HashMap<String, Vec<String>>,
}

static BUILTIN: Lazy<Registry> = Lazy::new(|| {
    Registry::new()
        .with_processor(
            "code",
            &[
                "generate_function",
                "fix_bug",
                "explain_code",
                "write_tests",
                "refactor_code",
                "add_docs",
                "custom",
            ],
        )
        .with_processor("latin", &["latin_analysis", "verse_lemmas"])
        .with_processor("psalm", &["psalm_query"])
        .with_processor("augustine", &["augustine_query"])
        .with_alias("write_code", "generate_function")
        .with_alias("generate_code", "generate_function")
        .with_alias("write_test", "write_tests")
        .with_alias("fix_this", "fix_bug")
        .with_requirement("generate_function", &["task"])
        .with_requirement("fix_bug", &["code", "issue"])
        .with_requirement("explain_code", &["code"])
        .with_requirement("write_tests", &["code"])
        .with_requirement("refactor_code", &["code"])
        .with_requirement("add_docs", &["code"])
        .with_requirement("custom", &["prompt"])
        .with_requirement("latin_analysis", &["word_form"])
        .with_requirement("verse_lemmas", &["verse"])
        .with_requirement("psalm_query", &["question"])
        .with_requirement("augustine_query", &["question"])
});

impl Registry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in process-wide registry
    ///
    /// Constructed on first use and shared read-only for the life of the
    /// process; concurrent readers need no synchronization.
    #[must_use]
    pub fn builtin() -> &'static Registry {
        &BUILTIN
    }

    /// Add a processor; declaration order is the auto-selection order
    ///
    /// Each allowed pattern is also registered as its own alias, so known
    /// canonical names always resolve to themselves.
    #[must_use]
    pub fn with_processor(mut self, name: impl Into<String>, allowed_patterns: &[&str]) -> Self {
        for pattern in allowed_patterns {
            self.aliases
                .entry((*pattern).to_string())
                .or_insert_with(|| (*pattern).to_string());
        }
        self.processors
            .push(ProcessorDescriptor::new(name, allowed_patterns));
        self
    }

    /// Add a pattern alias
    #[must_use]
    pub fn with_alias(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.aliases.insert(from.into(), to.into());
        self
    }

    /// Declare the required, non-empty fields for a pattern
    #[must_use]
    pub fn with_requirement(mut self, pattern: impl Into<String>, fields: &[&str]) -> Self {
        self.requirements
            .insert(pattern.into(), fields.iter().map(ToString::to_string).collect());
        self
    }

    /// Canonicalize a raw pattern name via the alias table
    ///
    /// Lookup is case-insensitive; `None` means the name is unknown.
    #[must_use]
    pub fn canonical_pattern(&self, raw: &str) -> Option<&str> {
        self.aliases
            .get(raw.trim().to_lowercase().as_str())
            .map(String::as_str)
    }

    /// Look up a processor by name
    #[must_use]
    pub fn processor(&self, name: &str) -> Option<&ProcessorDescriptor> {
        self.processors.iter().find(|p| p.name == name)
    }

    /// All processors, in declaration order
    #[inline]
    #[must_use]
    pub fn processors(&self) -> &[ProcessorDescriptor] {
        &self.processors
    }

    /// Required field names for a pattern (empty when unconstrained)
    #[must_use]
    pub fn required_fields(&self, pattern: &str) -> &[String] {
        self.requirements
            .get(pattern)
            .map_or(&[], Vec::as_slice)
    }
}
