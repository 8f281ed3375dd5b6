//! Cell-magic block collection
//!
//! A `%%name args` header opens a block; body lines are buffered verbatim
//! until a blank line, which terminates the block and is consumed. The whole
//! block is emitted as one `run_cell_magic` call.

use super::rewrite::py_repr;
use super::transformer::Transformer;

enum State {
    Idle,
    Body {
        magic_name: String,
        first: String,
        body: Vec<String>,
    },
}

/// Stateful collector for `%%` cell-magic blocks.
pub struct CellBlockCollector {
    state: State,
}

impl CellBlockCollector {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }
}

impl Default for CellBlockCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer for CellBlockCollector {
    fn push(&mut self, line: &str) -> Option<String> {
        match &mut self.state {
            State::Idle => {
                if !line.starts_with("%%") {
                    return Some(line.to_string());
                }
                let (head, first) = match line.split_once(' ') {
                    Some((head, first)) => (head, first),
                    None => (line, ""),
                };
                self.state = State::Body {
                    magic_name: head.trim_start_matches('%').to_string(),
                    first: first.to_string(),
                    body: Vec::new(),
                };
                None
            }
            State::Body {
                magic_name,
                first,
                body,
            } => {
                if line.trim().is_empty() {
                    // Terminator consumed: not part of the body, not re-emitted.
                    let out = format!(
                        "get_ipython().run_cell_magic({}, {}, {})",
                        py_repr(magic_name),
                        py_repr(first),
                        py_repr(&body.join("\n"))
                    );
                    self.state = State::Idle;
                    Some(out)
                } else {
                    body.push(line.to_string());
                    None
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
    fn test_plain_code_passes_through() {
        let mut t = CellBlockCollector::new();
        assert_eq!(t.push("x = 1"), Some("x = 1".to_string()));
        assert_eq!(t.push(""), Some("".to_string()));
    }

    #[test]
    fn test_line_magic_passes_through() {
        let mut t = CellBlockCollector::new();
        assert_eq!(t.push("%timeit x"), Some("%timeit x".to_string()));
    }

    #[test]
    fn test_simple_block() {
        let mut t = CellBlockCollector::new();
        assert_eq!(t.push("%%bash"), None);
        assert_eq!(t.push("echo hi"), None);
        assert_eq!(
            t.push(""),
            Some("get_ipython().run_cell_magic('bash', '', 'echo hi')".to_string())
        );
    }

    #[test]
    fn test_header_arguments() {
        let mut t = CellBlockCollector::new();
        assert_eq!(t.push("%%timeit -n 100"), None);
        assert_eq!(t.push("f(x)"), None);
        assert_eq!(
            t.push(""),
            Some("get_ipython().run_cell_magic('timeit', '-n 100', 'f(x)')".to_string())
        );
    }

    #[test]
    fn test_multi_line_body_joined_with_newlines() {
        let mut t = CellBlockCollector::new();
        t.push("%%bash");
        t.push("echo one");
        t.push("echo two");
        assert_eq!(
            t.push("   "),
            Some("get_ipython().run_cell_magic('bash', '', 'echo one\\necho two')".to_string())
        );
    }

    #[test]
    fn test_empty_body_block() {
        let mut t = CellBlockCollector::new();
        assert_eq!(t.push("%%bash"), None);
        assert_eq!(
            t.push(""),
            Some("get_ipython().run_cell_magic('bash', '', '')".to_string())
        );
    }

    #[test]
    fn test_idle_again_after_block() {
        let mut t = CellBlockCollector::new();
        t.push("%%bash");
        t.push("echo hi");
        t.push("");
        assert_eq!(t.push("x = 1"), Some("x = 1".to_string()));
    }

    #[test]
    fn test_reset_discards_partial_block() {
        let mut t = CellBlockCollector::new();
        t.push("%%bash");
        t.push("echo hi");
        t.reset();
        assert_eq!(t.push("x = 1"), Some("x = 1".to_string()));
    }
}
