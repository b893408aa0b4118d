//! Ordered field container produced by scanning
//!
//! A [`FieldBag`] maps lowercase field keys to accumulated string values.
//! Insertion order is preserved so callers can observe the order in which
//! directives appeared in the message.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping of directive field keys to values
///
/// Keys are lowercase. A repeated header for the same key overwrites the
/// previous value ("last full header wins"); content lines following a
/// header append to it, newline-joined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBag {
    inner: IndexMap<String, String>,
}

impl FieldBag {
    /// Create new empty bag
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a field at `key` with an optional inline value
    ///
    /// An existing value under the same key is discarded, matching the
    /// "last full header wins" container rule.
    pub fn begin(&mut self, key: &str, inline: Option<&str>) {
        let first = inline.map(str::trim).filter(|v| !v.is_empty());
        self.inner
            .insert(key.to_string(), first.unwrap_or_default().to_string());
    }

    /// Append a content line to `key`, newline-joined
    ///
    /// The line is trimmed and blank lines are skipped, so multi-line
    /// values never pick up stray whitespace or empty lines. Creates the
    /// field if it does not exist yet.
    pub fn push_line(&mut self, key: &str, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        let value = self.inner.entry(key.to_string()).or_default();
        if !value.is_empty() {
            value.push('\n');
        }
        value.push_str(line);
    }

    /// Set `key` to `value`, replacing any existing value
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.inner.insert(key.to_string(), value.into());
    }

    /// Get the value for `key`
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    /// Check whether `key` is present
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Check whether `key` holds a non-empty value after trimming
    #[inline]
    #[must_use]
    pub fn has_content(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.trim().is_empty())
    }

    /// Number of fields captured
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the bag is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Consume the bag, yielding the underlying ordered map
    #[must_use]
    pub fn into_inner(self) -> IndexMap<String, String> {
        self.inner
    }
}

impl IntoIterator for FieldBag {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_with_inline_value() {
        let mut bag = FieldBag::new();
        bag.begin("task", Some("  write a parser  "));
        assert_eq!(bag.get("task"), Some("write a parser"));
    }

    #[test]
    fn begin_overwrites_previous_value() {
        let mut bag = FieldBag::new();
        bag.begin("task", Some("first"));
        bag.push_line("task", "more");
        bag.begin("task", Some("second"));
        assert_eq!(bag.get("task"), Some("second"));
    }

    #[test]
    fn push_line_joins_with_newline() {
        let mut bag = FieldBag::new();
        bag.begin("task", Some("line1"));
        bag.push_line("task", "  line2  ");
        bag.push_line("task", "line3");
        assert_eq!(bag.get("task"), Some("line1\nline2\nline3"));
    }

    #[test]
    fn push_line_skips_blank_lines() {
        let mut bag = FieldBag::new();
        bag.begin("task", Some("line1"));
        bag.push_line("task", "   ");
        bag.push_line("task", "line2");
        assert_eq!(bag.get("task"), Some("line1\nline2"));
    }

    #[test]
    fn push_line_creates_missing_field() {
        let mut bag = FieldBag::new();
        bag.push_line("explanation", "trailing prose");
        assert_eq!(bag.get("explanation"), Some("trailing prose"));
    }

    #[test]
    fn insertion_order_preserved() {
        let mut bag = FieldBag::new();
        bag.begin("pattern", Some("fix_bug"));
        bag.begin("issue", Some("off by one"));
        bag.begin("language", Some("python"));

        let keys: Vec<_> = bag.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["pattern", "issue", "language"]);
    }

    #[test]
    fn has_content_rejects_whitespace() {
        let mut bag = FieldBag::new();
        bag.set("issue", "   ");
        assert!(bag.contains("issue"));
        assert!(!bag.has_content("issue"));
    }
}
