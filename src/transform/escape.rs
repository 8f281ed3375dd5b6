//! Escape dispatch
//!
//! Recognizes single-line escape syntax (`!`, `!!`, `?`, `??`, `%`, `,`, `;`,
//! `/`) and rewrites it to the registered call form. Lines ending in a
//! backslash are buffered and joined before dispatch, so an escaped command
//! may span several physical lines.

use super::rewrite;
use super::transformer::Transformer;
use crate::splitline::{classify, EscapeKind};

enum State {
    Idle,
    Buffering { parts: Vec<String> },
}

/// Stateful dispatcher for single-line escapes. A no-op for ordinary code.
pub struct EscapeDispatcher {
    state: State,
}

impl EscapeDispatcher {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Escape kinds this dispatcher rewrites. Cell magic is block-scoped and
    /// handled by the cell collector instead.
    fn dispatches(kind: EscapeKind) -> bool {
        !matches!(kind, EscapeKind::None | EscapeKind::CellMagic)
    }

    /// Strip the trailing backslash (and the whitespace before it) from a
    /// continuation line, so joined parts meet at a single space.
    fn strip_continuation(line: &str) -> &str {
        if line.ends_with('\\') {
            line.trim_end_matches('\\').trim_end()
        } else {
            line
        }
    }

    fn dispatch(joined: &str) -> String {
        let info = classify(joined);
        match info.escape {
            EscapeKind::Shell => rewrite::shell_exec(&info),
            EscapeKind::ShellCapture => rewrite::shell_capture(&info),
            EscapeKind::Help | EscapeKind::HelpVerbose => rewrite::help(&info),
            EscapeKind::Magic => rewrite::magic(&info),
            EscapeKind::Quote => rewrite::quote_args(&info),
            EscapeKind::QuoteWhole => rewrite::quote_whole(&info),
            EscapeKind::Paren => rewrite::paren_call(&info),
            // Joining changed the classification; pass the text through
            // rather than guessing.
            EscapeKind::None | EscapeKind::CellMagic => joined.to_string(),
        }
    }
}

impl Default for EscapeDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer for EscapeDispatcher {
    fn push(&mut self, line: &str) -> Option<String> {
        match &mut self.state {
            State::Idle => {
                if line.trim().is_empty() {
                    return Some(line.to_string());
                }
                let info = classify(line);
                if !Self::dispatches(info.escape) {
                    return Some(line.to_string());
                }
                if line.ends_with('\\') {
                    self.state = State::Buffering {
                        parts: vec![Self::strip_continuation(line).to_string()],
                    };
                    None
                } else {
                    Some(Self::dispatch(line))
                }
            }
            State::Buffering { parts } => {
                parts.push(Self::strip_continuation(line).to_string());
                if line.ends_with('\\') {
                    None
                } else {
                    let joined = parts.join(" ");
                    self.state = State::Idle;
                    Some(Self::dispatch(&joined))
                }
            }
        }
    }

    fn reset(&mut self) {
        self.state = State::Idle;
    }
}
