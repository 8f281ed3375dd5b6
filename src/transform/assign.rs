//! Assignment-from-shell and assignment-from-magic rewriting
//!
//! `lhs = !cmd` assigns captured shell output; `lhs = %cmd` assigns a magic
//! result. Both support trailing-backslash continuation, re-matching the
//! joined text to recover the final captures.

use regex::Regex;

use super::rewrite::py_repr;
use super::transformer::Transformer;

enum State {
    Idle,
    Buffering { parts: Vec<String> },
}

/// Stateful assignment rewriter, parameterized by an assignment pattern with
/// named captures `lhs` and `cmd`, and a rewrite template.
pub struct AssignmentRewriter {
    pattern: Regex,
    template: fn(&str, &str) -> String,
    state: State,
}

fn system_template(lhs: &str, cmd: &str) -> String {
    format!("{} = get_ipython().getoutput({})", lhs, py_repr(cmd))
}

fn magic_template(lhs: &str, cmd: &str) -> String {
    format!("{} = get_ipython().magic({})", lhs, py_repr(cmd))
}

impl AssignmentRewriter {
    /// Build a rewriter from an assignment pattern (matched at the start of
    /// the line, named captures `lhs` and `cmd`) and a template instantiated
    /// with the recovered captures.
    pub fn new(pattern: &str, template: fn(&str, &str) -> String) -> Result<Self, String> {
        let pattern =
            Regex::new(pattern).map_err(|e| format!("invalid assignment pattern: {}", e))?;
        Ok(Self {
            pattern,
            template,
            state: State::Idle,
        })
    }

    /// `lhs = !cmd` - assign captured shell output.
    pub fn from_system() -> Result<Self, String> {
        Self::new(
            r"(?P<lhs>\s*[\w.]+(?:\s*,\s*[\w.]+)*)\s*=\s*!\s*(?P<cmd>.*)",
            system_template,
        )
    }

    /// `lhs = %cmd` - assign a magic result.
    pub fn from_magic() -> Result<Self, String> {
        Self::new(
            r"(?P<lhs>\s*[\w.]+(?:\s*,\s*[\w.]+)*)\s*=\s*%\s*(?P<cmd>.*)",
            magic_template,
        )
    }

    fn matches_at_start(&self, line: &str) -> bool {
        matches!(self.pattern.find(line), Some(m) if m.start() == 0)
    }

    fn strip_continuation(line: &str) -> &str {
        if line.ends_with('\\') {
            line.trim_end_matches('\\').trim_end()
        } else {
            line
        }
    }

    fn rewrite(&self, joined: &str) -> String {
        match self.pattern.captures(joined) {
            Some(caps) if caps.get(0).map_or(false, |m| m.start() == 0) => {
                (self.template)(&caps["lhs"], &caps["cmd"])
            }
            // Joining changed the shape; pass through rather than panic.
            _ => joined.to_string(),
        }
    }
}

impl Transformer for AssignmentRewriter {
    fn push(&mut self, line: &str) -> Option<String> {
        match &mut self.state {
            State::Idle => {
                if line.trim().is_empty() {
                    return Some(line.to_string());
                }
                if !self.matches_at_start(line) {
                    return Some(line.to_string());
                }
                if line.ends_with('\\') {
                    self.state = State::Buffering {
                        parts: vec![Self::strip_continuation(line).to_string()],
                    };
                    None
                } else {
                    Some(self.rewrite(line))
                }
            }
            State::Buffering { parts } => {
                parts.push(Self::strip_continuation(line).to_string());
                if line.ends_with('\\') {
                    None
                } else {
                    let joined = parts.join(" ");
                    self.state = State::Idle;
                    Some(self.rewrite(&joined))
                }
            }
        }
    }

    fn reset(&mut self) {
        self.state = State::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_assignment() {
        let mut t = AssignmentRewriter::from_system().unwrap();
        assert_eq!(
            t.push("result = !ls"),
            Some("result = get_ipython().getoutput('ls')".to_string())
        );
    }

    #[test]
    fn test_magic_assignment() {
        let mut t = AssignmentRewriter::from_magic().unwrap();
        assert_eq!(
            t.push("vars = %who"),
            Some("vars = get_ipython().magic('who')".to_string())
        );
    }

    #[test]
    fn test_dotted_and_tuple_lhs() {
        let mut t = AssignmentRewriter::from_system().unwrap();
        assert_eq!(
            t.push("a.b, c = !ls"),
            Some("a.b, c = get_ipython().getoutput('ls')".to_string())
        );
    }

    #[test]
    fn test_indent_preserved_in_lhs() {
        let mut t = AssignmentRewriter::from_system().unwrap();
        assert_eq!(
            t.push("  out = !pwd"),
            Some("  out = get_ipython().getoutput('pwd')".to_string())
        );
    }

    #[test]
    fn test_plain_assignment_unchanged() {
        let mut t = AssignmentRewriter::from_system().unwrap();
        assert_eq!(t.push("x = 1"), Some("x = 1".to_string()));
    }

    #[test]
    fn test_inequality_is_not_an_assignment() {
        let mut t = AssignmentRewriter::from_system().unwrap();
        assert_eq!(t.push("a != b"), Some("a != b".to_string()));
    }

    #[test]
    fn test_modulo_is_not_a_magic_assignment() {
        let mut t = AssignmentRewriter::from_magic().unwrap();
        assert_eq!(t.push("x = y % z"), Some("x = y % z".to_string()));
    }

    #[test]
    fn test_blank_line_passes_through() {
        let mut t = AssignmentRewriter::from_system().unwrap();
        assert_eq!(t.push("  "), Some("  ".to_string()));
    }

    #[test]
    fn test_backslash_continuation_joins_command() {
        let mut t = AssignmentRewriter::from_system().unwrap();
        assert_eq!(t.push("result = !ls \\"), None);
        assert_eq!(
            t.push("-la"),
            Some("result = get_ipython().getoutput('ls -la')".to_string())
        );
    }

    #[test]
    fn test_reset_discards_buffer() {
        let mut t = AssignmentRewriter::from_system().unwrap();
        assert_eq!(t.push("result = !ls \\"), None);
        t.reset();
        assert_eq!(t.push("x = 1"), Some("x = 1".to_string()));
    }

    #[test]
    fn test_invalid_pattern_is_construction_error() {
        assert!(AssignmentRewriter::new(r"(?P<lhs>", system_template).is_err());
    }
}
