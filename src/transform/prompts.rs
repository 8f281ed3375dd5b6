//! Pasted-prompt stripping
//!
//! Input pasted from another interactive session carries its prompts. This
//! stage strips a matching primary prompt from the first line and
//! continuation prompts from the lines after it. If the very first line has
//! no prompt, the stage stops scanning for the rest of the entry.

use regex::Regex;

use super::transformer::Transformer;

enum State {
    /// Watching for a primary prompt
    Detecting,
    /// Primary prompt seen; stripping continuation prompts
    Stripping,
    /// No prompts in this entry; emit everything unchanged until reset
    Passthrough,
}

/// Stateful prompt stripper, parameterized by the two prompt patterns.
///
/// Runs even on lines inside an open string literal: a pasted transcript
/// legitimately contains prompt-looking text adjacent to string content.
pub struct PromptStripper {
    primary: Regex,
    continuation: Regex,
    state: State,
}

impl PromptStripper {
    /// Build a stripper from two prompt patterns. Patterns are matched at the
    /// start of the line; an invalid pattern is a construction error.
    pub fn new(primary: &str, continuation: &str) -> Result<Self, String> {
        let primary =
            Regex::new(primary).map_err(|e| format!("invalid primary prompt pattern: {}", e))?;
        let continuation = Regex::new(continuation)
            .map_err(|e| format!("invalid continuation prompt pattern: {}", e))?;
        Ok(Self {
            primary,
            continuation,
            state: State::Detecting,
        })
    }

    /// Classic interactive-interpreter prompts: `>>> ` and `... `.
    pub fn classic() -> Result<Self, String> {
        Self::new(r"^(>>> )", r"^(>>> |\.\.\. )")
    }

    /// This shell's own numbered prompts: `In [n]: ` and the aligned `...: `.
    pub fn numbered() -> Result<Self, String> {
        Self::new(r"^In \[\d+\]: ", r"^(In \[\d+\]: |   \.\.\.+: )")
    }

    fn strip_match<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
        match re.find(line) {
            Some(m) if m.start() == 0 => Some(&line[m.end()..]),
            _ => None,
        }
    }
}

impl Transformer for PromptStripper {
    fn push(&mut self, line: &str) -> Option<String> {
        match self.state {
            State::Detecting => match Self::strip_match(&self.primary, line) {
                Some(stripped) => {
                    self.state = State::Stripping;
                    Some(stripped.to_string())
                }
                None => {
                    self.state = State::Passthrough;
                    Some(line.to_string())
                }
            },
            State::Stripping => match Self::strip_match(&self.continuation, line) {
                Some(stripped) => Some(stripped.to_string()),
                None => {
                    // The mismatching line passes through raw; only the line
                    // after it is tested against the primary pattern again.
                    self.state = State::Detecting;
                    Some(line.to_string())
                }
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
    fn test_classic_strips_primary_and_continuation() {
        let mut t = PromptStripper::classic().unwrap();
        assert_eq!(t.push(">>> x = 1"), Some("x = 1".to_string()));
        assert_eq!(t.push("... y = 2"), Some("y = 2".to_string()));
    }

    #[test]
    fn test_classic_primary_accepted_while_stripping() {
        let mut t = PromptStripper::classic().unwrap();
        t.push(">>> x = 1");
        assert_eq!(t.push(">>> y = 2"), Some("y = 2".to_string()));
    }

    #[test]
    fn test_mismatch_passes_raw_then_detects_fresh() {
        let mut t = PromptStripper::classic().unwrap();
        assert_eq!(t.push(">>> x = 1"), Some("x = 1".to_string()));
        assert_eq!(t.push("z = 3"), Some("z = 3".to_string()));
        // the next push is evaluated fresh against the primary pattern
        assert_eq!(t.push(">>> w = 4"), Some("w = 4".to_string()));
    }

    #[test]
    fn test_no_prompt_on_first_line_means_passthrough() {
        let mut t = PromptStripper::classic().unwrap();
        assert_eq!(t.push("x = 1"), Some("x = 1".to_string()));
        // prompt-looking lines are no longer touched
        assert_eq!(t.push(">>> y = 2"), Some(">>> y = 2".to_string()));
    }

    #[test]
    fn test_reset_restores_detection() {
        let mut t = PromptStripper::classic().unwrap();
        t.push("x = 1");
        t.reset();
        assert_eq!(t.push(">>> y = 2"), Some("y = 2".to_string()));
    }

    #[test]
    fn test_numbered_prompts() {
        let mut t = PromptStripper::numbered().unwrap();
        assert_eq!(t.push("In [1]: for i in range(2):"), Some("for i in range(2):".to_string()));
        assert_eq!(t.push("   ...:     print(i)"), Some("    print(i)".to_string()));
        assert_eq!(t.push("In [2]: x = 1"), Some("x = 1".to_string()));
    }

    #[test]
    fn test_numbered_first_line_without_prompt_is_passthrough() {
        let mut t = PromptStripper::numbered().unwrap();
        assert_eq!(t.push("x = 1"), Some("x = 1".to_string()));
        assert_eq!(t.push("In [1]: y"), Some("In [1]: y".to_string()));
    }

    #[test]
    fn test_invalid_pattern_is_construction_error() {
        assert!(PromptStripper::new(r"([", r"^").is_err());
    }

    #[test]
    fn test_reset_idempotent() {
        let mut t = PromptStripper::classic().unwrap();
        t.reset();
        t.reset();
        assert_eq!(t.push(">>> a"), Some("a".to_string()));
    }
}
