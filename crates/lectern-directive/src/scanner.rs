//! Directive scanner
//!
//! Single-pass, line-oriented state machine over a chat message. Collects
//! `### Key: value` headers, fenced code blocks and trailing prose into an
//! ordered [`FieldBag`].
//!
//! # State machine
//!
//! ```text
//! Start ──header──▶ InField(key) ──fence──▶ InCode ──fence──▶ InExplanation
//!   │                    ▲                    ▲                    │
//!   └───────fence────────┼────────────────────┘◀──────header──────┘
//!                        │
//!        `### Code` ─▶ AwaitingFence (content only counts once fenced)
//! ```
//!
//! Headers and fences always win over plain content, with one exception:
//! inside an open fence only a closing fence is special, so code blocks may
//! contain `###` lines without being cut short.

use crate::fields::FieldBag;
use crate::language::canonical_language;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// Fence marker for code blocks
const FENCE: &str = "```";

// `### <key>[:]? <inline value>?` — the key is a single word, matched
// case-insensitively and stored lowercase.
static HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^###\s*(\w+):?\s*(.*)$").expect("directive header regex"));

/// Scanner state, advanced once per input line
#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    /// Before any directive has been seen
    Start,
    /// Accumulating content lines into the named field
    InField(String),
    /// Saw a `### Code` header; waiting for the opening fence
    AwaitingFence,
    /// Inside an open fence, capturing lines verbatim
    InCode,
    /// After a closing fence, capturing trailing prose
    InExplanation,
}

/// Single-pass directive scanner
///
/// Stateless between calls; each [`scan`](DirectiveScanner::scan) builds
/// and discards its own state, so one scanner value may be shared freely
/// across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectiveScanner;

impl DirectiveScanner {
    /// Create new scanner
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Scan a message into an ordered field bag
    ///
    /// Returns an empty bag when the text carries no directive headers and
    /// no fenced code block. Field values are newline-joined with each
    /// content line trimmed; `code` keeps its internal formatting verbatim.
    #[must_use]
    pub fn scan(&self, text: &str) -> FieldBag {
        let mut bag = FieldBag::new();
        let mut state = State::Start;
        let mut code_lines: Vec<String> = Vec::new();

        for line in text.lines() {
            let trimmed = line.trim();

            if trimmed.starts_with(FENCE) {
                state = self.on_fence(&mut bag, &mut code_lines, state, trimmed);
                continue;
            }

            // Inside a fence every non-fence line is content, headers included.
            if state != State::InCode {
                if let Some(caps) = trimmed.starts_with("###").then(|| HEADER.captures(trimmed)) {
                    if let Some(caps) = caps {
                        let key = caps[1].to_lowercase();
                        let inline = caps.get(2).map(|m| m.as_str());
                        trace!(key = %key, "directive header");
                        state = if key == "code" {
                            // Content under a Code header only counts once fenced.
                            State::AwaitingFence
                        } else {
                            bag.begin(&key, inline);
                            State::InField(key)
                        };
                    }
                    // Malformed `###` lines are dropped, state unchanged.
                    continue;
                }
            }

            match &state {
                State::Start | State::AwaitingFence => {}
                State::InField(key) => bag.push_line(key, trimmed),
                State::InCode => code_lines.push(line.to_string()),
                State::InExplanation => bag.push_line("explanation", trimmed),
            }
        }

        // An unterminated fence still contributes its content.
        if state == State::InCode && !code_lines.is_empty() {
            bag.set("code", code_lines.join("\n"));
        }

        bag
    }

    /// Handle a fence marker line, returning the next state
    fn on_fence(
        &self,
        bag: &mut FieldBag,
        code_lines: &mut Vec<String>,
        state: State,
        trimmed: &str,
    ) -> State {
        if state == State::InCode {
            // Closing fence: flush the block. A later block overwrites,
            // matching the "last full header wins" container rule.
            bag.set("code", code_lines.join("\n"));
            code_lines.clear();
            return State::InExplanation;
        }

        // Opening fence. Record the language tag unless one was already set.
        let tag = trimmed[FENCE.len()..].trim();
        if !tag.is_empty() && !bag.contains("language") {
            bag.set("language", canonical_language(tag));
        }
        code_lines.clear();
        State::InCode
    }
}
