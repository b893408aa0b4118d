//! Supported language names and canonicalization
//!
//! Language tags arrive from fence markers (` ```swift `) and from free
//! text. Both are folded into a single canonical display form, defaulting
//! to `"Python"` when nothing is recognized.

use once_cell::sync::Lazy;
use regex::Regex;

/// Default language when no tag or mention is found
pub const DEFAULT_LANGUAGE: &str = "Python";

/// Supported language names, lowercase
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "python",
    "javascript",
    "typescript",
    "rust",
    "go",
    "java",
    "c",
    "c++",
    "c#",
    "swift",
    "ruby",
    "php",
    "kotlin",
    "scala",
    "haskell",
];

// Word-ish runs that can carry language names, including `c++` and `c#`.
static LANGUAGE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z0-9+#]+").expect("language token regex"));

/// Check whether a lowercase tag names a supported language
#[must_use]
pub fn is_supported(tag: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&tag.to_lowercase().as_str())
}

/// Canonical display form for a language tag
///
/// Known short tags map to their conventional spelling (`c#` → `C#`,
/// `js` → `JavaScript`); anything else gets its first letter capitalized.
#[must_use]
pub fn canonical_language(tag: &str) -> String {
    let lower = tag.trim().to_lowercase();
    match lower.as_str() {
        "c#" => "C#".to_string(),
        "c++" | "cpp" => "C++".to_string(),
        "js" | "javascript" => "JavaScript".to_string(),
        "ts" | "typescript" => "TypeScript".to_string(),
        "php" => "PHP".to_string(),
        _ => capitalize(&lower),
    }
}

/// Find the first supported language mentioned in free text
///
/// The text is lowercased and tokenized so that short names like `c` or
/// `go` only match as whole tokens, never inside ordinary words. Returns
/// the canonical display form.
#[must_use]
pub fn find_language_token(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    LANGUAGE_TOKEN
        .find_iter(&lower)
        .map(|m| m.as_str())
        .find(|token| SUPPORTED_LANGUAGES.contains(token))
        .map(canonical_language)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_capitalizes_plain_names() {
        assert_eq!(canonical_language("python"), "Python");
        assert_eq!(canonical_language("swift"), "Swift");
        assert_eq!(canonical_language("rust"), "Rust");
    }

    #[test]
    fn canonical_keeps_csharp_sigil() {
        assert_eq!(canonical_language("c#"), "C#");
        assert_eq!(canonical_language("C#"), "C#");
    }

    #[test]
    fn canonical_maps_short_tags() {
        assert_eq!(canonical_language("js"), "JavaScript");
        assert_eq!(canonical_language("ts"), "TypeScript");
        assert_eq!(canonical_language("cpp"), "C++");
        assert_eq!(canonical_language("php"), "PHP");
    }

    #[test]
    fn canonical_passes_unknown_through_capitalized() {
        assert_eq!(canonical_language("cobol"), "Cobol");
    }

    #[test]
    fn find_token_matches_whole_tokens_only() {
        // "clearly" contains 'c' but must not match the C language
        assert_eq!(find_language_token("clearly nothing here"), None);
        assert_eq!(
            find_language_token("please fix this in c for me"),
            Some("C".to_string())
        );
    }

    #[test]
    fn find_token_returns_first_mention() {
        assert_eq!(
            find_language_token("rust or python, whichever"),
            Some("Rust".to_string())
        );
    }

    #[test]
    fn find_token_handles_mixed_case() {
        assert_eq!(
            find_language_token("Write_code in Python: sum a list"),
            Some("Python".to_string())
        );
    }

    #[test]
    fn is_supported_checks_list() {
        assert!(is_supported("python"));
        assert!(is_supported("Swift"));
        assert!(!is_supported("klingon"));
    }
}
