//! Leading-indent normalization
//!
//! A block pasted with a uniform extra indent (an email quote, a doc
//! example) is re-aligned by stripping the exact whitespace prefix of its
//! first indented line from every line that carries it.

use once_cell::sync::Lazy;
use regex::Regex;

use super::transformer::Transformer;

static LEADING_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]+").expect("leading space pattern is valid"));

enum State {
    Detecting,
    Normalizing { prefix: String },
    Passthrough,
}

/// Stateful indent normalizer. Like the prompt stripper, it still runs on
/// lines inside an open string literal.
pub struct IndentNormalizer {
    state: State,
}

impl IndentNormalizer {
    pub fn new() -> Self {
        Self {
            state: State::Detecting,
        }
    }
}

impl Default for IndentNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer for IndentNormalizer {
    fn push(&mut self, line: &str) -> Option<String> {
        match &self.state {
            State::Detecting => match LEADING_SPACE.find(line) {
                Some(m) => {
                    let prefix = m.as_str().to_string();
                    // Normalization starts on this very line.
                    let out = line[prefix.len()..].to_string();
                    self.state = State::Normalizing { prefix };
                    Some(out)
                }
                None => {
                    self.state = State::Passthrough;
                    Some(line.to_string())
                }
            },
            State::Normalizing { prefix } => match line.strip_prefix(prefix.as_str()) {
                Some(stripped) => Some(stripped.to_string()),
                // A mismatch is not an error and does not reset detection.
                None => Some(line.to_string()),
            },
            State::Passthrough => Some(line.to_string()),
        }
    }

    fn reset(&mut self) {
        self.state = State::Detecting;
    }

    fn look_in_string(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_indent_stripped() {
        let mut t = IndentNormalizer::new();
        assert_eq!(t.push("    a = 1"), Some("a = 1".to_string()));
        assert_eq!(t.push("    b = 2"), Some("b = 2".to_string()));
    }

    #[test]
    fn test_deeper_indent_keeps_relative_depth() {
        let mut t = IndentNormalizer::new();
        assert_eq!(t.push("  if x:"), Some("if x:".to_string()));
        assert_eq!(t.push("      y = 1"), Some("    y = 1".to_string()));
    }

    #[test]
    fn test_tab_prefix_is_matched_exactly() {
        let mut t = IndentNormalizer::new();
        assert_eq!(t.push("\ta = 1"), Some("a = 1".to_string()));
        // spaces do not match a tab prefix
        assert_eq!(t.push("    b = 2"), Some("    b = 2".to_string()));
        // but further tab lines do
        assert_eq!(t.push("\tc = 3"), Some("c = 3".to_string()));
    }

    #[test]
    fn test_mismatch_does_not_reset_detection() {
        let mut t = IndentNormalizer::new();
        t.push("    a = 1");
        assert_eq!(t.push("b = 2"), Some("b = 2".to_string()));
        assert_eq!(t.push("    c = 3"), Some("c = 3".to_string()));
    }

    #[test]
    fn test_unindented_first_line_means_passthrough() {
        let mut t = IndentNormalizer::new();
        assert_eq!(t.push("not indented"), Some("not indented".to_string()));
        assert_eq!(t.push("    later"), Some("    later".to_string()));
    }

    #[test]
    fn test_reset_restores_detection() {
        let mut t = IndentNormalizer::new();
        t.push("not indented");
        t.reset();
        assert_eq!(t.push("    a"), Some("a".to_string()));
    }

    #[test]
    fn test_reset_after_normalizing() {
        let mut t = IndentNormalizer::new();
        t.push("  a");
        t.reset();
        assert_eq!(t.push("    b"), Some("b".to_string()));
    }
}
