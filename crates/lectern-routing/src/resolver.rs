//! Pattern resolution
//!
//! Turns a scanned [`FieldBag`] into a canonical [`PatternRequest`]:
//! canonicalizes the pattern through the alias table, infers a pattern when
//! only a processor was declared, splits fields into fixed slots and
//! passthrough, and applies trimming and language defaulting.

use crate::error::ResolveError;
use crate::registry::Registry;
use crate::request::{PatternRequest, SLOT_KEYS};
use lectern_directive::language::{canonical_language, DEFAULT_LANGUAGE};
use lectern_directive::FieldBag;
use tracing::debug;

/// Resolver from scanned fields to a canonical request
#[derive(Debug, Clone, Copy)]
pub struct PatternResolver<'a> {
    registry: &'a Registry,
}

impl<'a> PatternResolver<'a> {
    /// Create new resolver over a registry
    #[inline]
    #[must_use]
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Resolve a field bag into a [`PatternRequest`]
    ///
    /// The pattern comes from the `pattern` field when present (alias miss
    /// is an error), otherwise it is inferred from which fields accompany a
    /// declared `processor`. Pure and synchronous; never retries.
    pub fn resolve(&self, fields: FieldBag) -> Result<PatternRequest, ResolveError> {
        let pattern = match fields.get("pattern") {
            Some(raw) => self
                .registry
                .canonical_pattern(raw)
                .ok_or_else(|| ResolveError::UnknownPattern(raw.trim().to_string()))?
                .to_string(),
            None => self.infer_pattern(&fields)?,
        };
        debug!(pattern = %pattern, "pattern resolved");

        Ok(build_request(pattern, fields))
    }

    /// Infer a pattern from populated fields, per-processor priority order
    fn infer_pattern(&self, fields: &FieldBag) -> Result<String, ResolveError> {
        let processor = fields.get("processor").ok_or(ResolveError::NoPattern)?;

        let raw = match processor.trim().to_lowercase().as_str() {
            "latin" if fields.has_content("word_form") => "latin_analysis",
            "latin" if fields.has_content("verse") => "verse_lemmas",
            "code" if fields.has_content("prompt") => "custom",
            "code" if fields.has_content("task") => "write_code",
            "code" if fields.has_content("code") && fields.has_content("issue") => "fix_bug",
            "code" if fields.has_content("code") => "explain_code",
            "psalm" if fields.has_content("question") => "psalm_query",
            "augustine" if fields.has_content("question") => "augustine_query",
            _ => return Err(ResolveError::NoPattern),
        };
        debug!(processor = %processor, pattern = raw, "pattern inferred from processor");

        // Inferred names go through the same alias table as explicit ones.
        self.registry
            .canonical_pattern(raw)
            .map(ToString::to_string)
            .ok_or_else(|| ResolveError::UnknownPattern(raw.to_string()))
    }
}

/// Copy recognized fields into slots, the rest into passthrough; trim all
/// string slots and default the language.
fn build_request(pattern: String, fields: FieldBag) -> PatternRequest {
    let mut request = PatternRequest {
        pattern,
        ..PatternRequest::default()
    };

    for (key, value) in fields {
        match key.as_str() {
            // `pattern` was already canonicalized into the request.
            "pattern" => {}
            "language" => request.language = canonical_language(&value),
            // Outer trim only; internal formatting stays verbatim.
            "code" => request.code = non_empty(value.trim()),
            "task" => request.task = non_empty(value.trim()),
            "issue" => request.issue = non_empty(value.trim()),
            "rules" => request.rules = non_empty(value.trim()),
            "prompt" => request.prompt = non_empty(value.trim()),
            "question" => request.question = non_empty(value.trim()),
            "word_form" => request.word_form = non_empty(value.trim()),
            "explanation" => request.explanation = non_empty(value.trim()),
            "processor" => request.processor = non_empty(value.trim().to_lowercase().as_str()),
            _ => {
                request.extra.insert(key, value.trim().to_string());
            }
        }
    }

    if request.language.is_empty() {
        request.language = DEFAULT_LANGUAGE.to_string();
    }

    request
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_directive::{DirectiveScanner, FieldBag};
    use pretty_assertions::assert_eq;

    fn resolve(text: &str) -> Result<PatternRequest, ResolveError> {
        let fields = DirectiveScanner::new().scan(text);
        PatternResolver::new(Registry::builtin()).resolve(fields)
    }

    #[test]
    fn explicit_pattern_resolves() {
        let request = resolve("### Pattern: explain_code\n```swift\nlet x = 1\n```").unwrap();
        assert_eq!(request.pattern, "explain_code");
        assert_eq!(request.language, "Swift");
        assert_eq!(request.code.as_deref(), Some("let x = 1"));
    }

    #[test]
    fn pattern_alias_canonicalized() {
        let request = resolve("### Pattern: write_code\n### Task: sum a list").unwrap();
        assert_eq!(request.pattern, "generate_function");
    }

    #[test]
    fn unknown_pattern_is_error() {
        let err = resolve("### Pattern: frobnicate").unwrap_err();
        assert_eq!(err, ResolveError::UnknownPattern("frobnicate".to_string()));
    }

    #[test]
    fn no_pattern_no_processor_is_error() {
        let err = resolve("### Task: something").unwrap_err();
        assert_eq!(err, ResolveError::NoPattern);
    }

    #[test]
    fn latin_word_form_infers_analysis() {
        let request = resolve("### Processor: latin\n### word_form: amare").unwrap();
        assert_eq!(request.pattern, "latin_analysis");
        assert_eq!(request.word_form.as_deref(), Some("amare"));
    }

    #[test]
    fn latin_verse_infers_lemmas() {
        let request = resolve("### Processor: latin\n### Verse: Ps 23:1").unwrap();
        assert_eq!(request.pattern, "verse_lemmas");
        assert_eq!(request.extra.get("verse").map(String::as_str), Some("Ps 23:1"));
    }

    #[test]
    fn code_inference_priority() {
        // prompt beats task beats code+issue beats code alone
        let request =
            resolve("### Processor: code\n### Prompt: do a thing\n### Task: also this").unwrap();
        assert_eq!(request.pattern, "custom");

        let request = resolve("### Processor: code\n### Task: sum a list").unwrap();
        assert_eq!(request.pattern, "generate_function");

        let request =
            resolve("### Processor: code\n### Issue: broken\n```\nx = 1\n```").unwrap();
        assert_eq!(request.pattern, "fix_bug");

        let request = resolve("### Processor: code\n```\nx = 1\n```").unwrap();
        assert_eq!(request.pattern, "explain_code");
    }

    #[test]
    fn psalm_question_infers_query() {
        let request = resolve("### Processor: psalm\n### Question: who wrote psalm 23?").unwrap();
        assert_eq!(request.pattern, "psalm_query");
    }

    #[test]
    fn processor_without_usable_fields_is_no_pattern() {
        let err = resolve("### Processor: latin\n### Rules: be brief").unwrap_err();
        assert_eq!(err, ResolveError::NoPattern);
    }

    #[test]
    fn language_defaults_to_python() {
        let request = resolve("### Pattern: custom\n### Prompt: hello").unwrap();
        assert_eq!(request.language, "Python");
    }

    #[test]
    fn language_value_canonicalized() {
        let request = resolve("### Pattern: custom\n### Language: python").unwrap();
        assert_eq!(request.language, "Python");
    }

    #[test]
    fn slots_are_trimmed() {
        let request = resolve("### Pattern: custom\n### Prompt:    spaced out   ").unwrap();
        assert_eq!(request.prompt.as_deref(), Some("spaced out"));
    }

    #[test]
    fn unrecognized_keys_land_in_extra() {
        let request = resolve("### Pattern: custom\n### Prompt: hi\n### Mood: cheerful").unwrap();
        assert_eq!(request.extra.get("mood").map(String::as_str), Some("cheerful"));
    }

    #[test]
    fn code_keeps_internal_formatting() {
        let request =
            resolve("### Pattern: explain_code\n```\ndef f():\n\n    return 1\n```").unwrap();
        assert_eq!(request.code.as_deref(), Some("def f():\n\n    return 1"));
    }

    #[test]
    fn slot_keys_never_land_in_extra() {
        // Guards `build_request` against letting a fixed slot fall through
        // to the passthrough map.
        let mut fields = FieldBag::new();
        for key in SLOT_KEYS {
            fields.set(key, "x");
        }
        fields.set("pattern", "custom");

        let request = PatternResolver::new(Registry::builtin())
            .resolve(fields)
            .unwrap();
        assert!(request.extra.is_empty());
    }
}
