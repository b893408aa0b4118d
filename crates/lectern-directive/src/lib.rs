//! Lectern directive scanning
//!
//! Turns a free-form chat message into an ordered bag of named fields:
//!
//! - **Ingress**: [`DirectiveScanner`] walks the message line by line,
//!   collecting `### Key: value` headers and fenced code blocks
//! - **Fallback**: [`LegacyKeywordDetector`] recognizes bare keyword
//!   messages (`write_code`, `fix_bug`, ...) when no headers are present
//! - **Output**: a [`FieldBag`] handed to the resolver/router layer
//!
//! No I/O happens here; every scan is a pure function of its input text.
//!
//! # Example
//!
//! ```rust
//! use lectern_directive::DirectiveScanner;
//!
//! let scanner = DirectiveScanner::new();
//! let fields = scanner.scan("### Pattern: explain_code\n```rust\nfn main() {}\n```");
//!
//! assert_eq!(fields.get("pattern"), Some("explain_code"));
//! assert_eq!(fields.get("code"), Some("fn main() {}"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod fields;
pub mod language;
pub mod legacy;
pub mod scanner;

// Re-exports for convenience
pub use fields::FieldBag;
pub use language::{canonical_language, find_language_token, is_supported, DEFAULT_LANGUAGE};
pub use legacy::LegacyKeywordDetector;
pub use scanner::DirectiveScanner;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with directive scanning
    pub use crate::fields::FieldBag;
    pub use crate::legacy::LegacyKeywordDetector;
    pub use crate::scanner::DirectiveScanner;
}
