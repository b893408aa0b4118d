//! Testing utilities for the Lectern workspace
//!
//! Shared fixtures: a builder that renders requests into the directive
//! header/fence textual form, used by round-trip tests.

#![allow(missing_docs)]

use std::fmt::Write as _;

/// Renders a directive message in header/fence textual form.
///
/// Headers appear in the order they were added; the fenced code block and
/// trailing explanation come last, matching how real directive messages
/// are laid out.
#[derive(Debug, Clone, Default)]
pub struct DirectiveMessage {
    headers: Vec<(String, String)>,
    code: Option<(Option<String>, String)>,
    explanation: Option<String>,
}

impl DirectiveMessage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pattern(self, pattern: &str) -> Self {
        self.header("Pattern", pattern)
    }

    #[must_use]
    pub fn processor(self, processor: &str) -> Self {
        self.header("Processor", processor)
    }

    #[must_use]
    pub fn language(self, language: &str) -> Self {
        self.header("Language", language)
    }

    #[must_use]
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    #[must_use]
    pub fn code(mut self, tag: Option<&str>, body: &str) -> Self {
        self.code = Some((tag.map(ToString::to_string), body.to_string()));
        self
    }

    #[must_use]
    pub fn explanation(mut self, text: &str) -> Self {
        self.explanation = Some(text.to_string());
        self
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.headers {
            let _ = writeln!(out, "### {key}: {value}");
        }
        if let Some((tag, body)) = &self.code {
            let _ = writeln!(out, "```{}", tag.as_deref().unwrap_or_default());
            let _ = writeln!(out, "{body}");
            let _ = writeln!(out, "```");
        }
        if let Some(explanation) = &self.explanation {
            let _ = writeln!(out, "{explanation}");
        }
        out
    }
}

/// A complete explain_code message with a Swift snippet.
#[must_use]
pub fn explain_code_message() -> String {
    DirectiveMessage::new()
        .pattern("explain_code")
        .language("Swift")
        .code(Some("swift"), "let x = 1")
        .render()
}

/// A complete fix_bug message with issue and fenced code.
#[must_use]
pub fn fix_bug_message() -> String {
    DirectiveMessage::new()
        .pattern("fix_bug")
        .header("Issue", "off by one")
        .language("python")
        .code(Some("python"), "def f(): pass")
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_directive::DirectiveScanner;

    #[test]
    fn render_produces_scannable_text() {
        let text = explain_code_message();
        let bag = DirectiveScanner::new().scan(&text);
        assert_eq!(bag.get("pattern"), Some("explain_code"));
        assert_eq!(bag.get("code"), Some("let x = 1"));
    }

    #[test]
    fn render_orders_headers_before_fence() {
        let text = DirectiveMessage::new()
            .pattern("custom")
            .header("Prompt", "hello")
            .code(None, "x = 1")
            .explanation("a note")
            .render();
        let fence_at = text.find("```").unwrap();
        assert!(text.find("### Pattern").unwrap() < fence_at);
        assert!(text.find("a note").unwrap() > fence_at);
    }
}
