//! Error types for resolution and routing
//!
//! Every failure here is an expected, recoverable outcome returned as data:
//! most chat messages are not directives at all, so nothing in this crate
//! panics, retries, or escalates. Callers match exhaustively and decide
//! their own fallback policy.

use serde::{Deserialize, Serialize};

/// Errors while resolving a field bag into a [`PatternRequest`]
///
/// [`PatternRequest`]: crate::request::PatternRequest
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ResolveError {
    /// A `pattern` header value has no entry in the alias table
    #[error("unknown pattern: '{0}'")]
    UnknownPattern(String),

    /// No pattern was declared and none could be inferred
    #[error("no pattern declared or inferable")]
    NoPattern,
}

/// Errors while routing a resolved request to a processor
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum RouteError {
    /// An explicit `processor` value is not in the registry
    #[error("unknown processor: '{0}'")]
    UnknownProcessor(String),

    /// The resolved pattern is not in the declared processor's allowed set
    #[error("pattern '{pattern}' is not handled by processor '{processor}'")]
    PatternProcessorMismatch {
        /// The declared processor
        processor: String,
        /// The resolved pattern
        pattern: String,
    },

    /// Auto-selection found no processor owning the pattern
    #[error("no processor handles pattern: '{0}'")]
    NoProcessorForPattern(String),

    /// The pattern routed, but required inputs are absent or empty
    #[error("missing required fields for '{pattern}': {}", .missing.join(", "))]
    MissingRequiredFields {
        /// The resolved pattern
        pattern: String,
        /// Names of the absent fields
        missing: Vec<String>,
    },
}

/// Combined failure for the full scan → resolve → route pipeline
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum PipelineError {
    /// Neither the scanner nor the keyword fallback found anything
    #[error("no directives found in message")]
    NoDirectivesFound,

    /// Resolution failed
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// Routing failed
    #[error("route error: {0}")]
    Route(#[from] RouteError),
}
