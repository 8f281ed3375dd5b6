//! Line splitting and escape classification
//!
//! Splits a raw physical line into (indent, escape, symbol, rest) and assigns
//! it an [`EscapeKind`]. Classification is pure and total: any string, empty
//! or garbled, produces a `LineInfo`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading punctuation that marks a line as shell, help, or magic syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeKind {
    /// Plain code, no escape prefix
    None,
    /// `!cmd` - execute a shell command
    Shell,
    /// `!!cmd` - execute a shell command and capture its output
    ShellCapture,
    /// `?name` or `name?` - object help
    Help,
    /// `??name` or `name??` - verbose object help
    HelpVerbose,
    /// `%magic` - line magic
    Magic,
    /// `%%magic` - cell magic header
    CellMagic,
    /// `,f a b` - call with each argument quoted
    Quote,
    /// `;f a b` - call with the whole rest quoted as one argument
    QuoteWhole,
    /// `/f a b` - call with bare arguments
    Paren,
}

impl EscapeKind {
    fn from_token(token: &str) -> EscapeKind {
        match token {
            "!" => EscapeKind::Shell,
            "!!" => EscapeKind::ShellCapture,
            "?" => EscapeKind::Help,
            "??" => EscapeKind::HelpVerbose,
            "%" => EscapeKind::Magic,
            "%%" => EscapeKind::CellMagic,
            "," => EscapeKind::Quote,
            ";" => EscapeKind::QuoteWhole,
            "/" => EscapeKind::Paren,
            _ => EscapeKind::None,
        }
    }
}

/// Classification of one physical line. Produced fresh per line, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineInfo {
    /// The line exactly as pushed
    pub line: String,
    /// Leading whitespace
    pub indent: String,
    /// Escape kind of the leading punctuation, if any
    pub escape: EscapeKind,
    /// Callable or target name following the escape (may keep a `%` prefix,
    /// so `?%magic` resolves help on the magic itself)
    pub symbol: String,
    /// Remaining text after the symbol, leading whitespace trimmed
    pub rest: String,
}

// indent, optional escape token, dotted symbol (wildcards allowed), rest
static LINE_SPLIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*)([,;/%]|!!?|\?\??)?\s*(%{0,2}[\w.*]*)(.*)$")
        .expect("line split pattern is valid")
});

static INDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*").expect("indent pattern is valid"));

/// Classify one raw line. Pure and stateless.
pub fn classify(line: &str) -> LineInfo {
    let indent = INDENT
        .find(line)
        .map(|m| m.as_str())
        .unwrap_or("")
        .to_string();
    let after_indent = &line[indent.len()..];

    // Cell-magic headers get their own kind; the generic split would read the
    // second `%` as part of the symbol.
    if let Some(cell) = after_indent.strip_prefix("%%") {
        let (symbol, rest) = match cell.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest),
            None => (cell, ""),
        };
        return LineInfo {
            line: line.to_string(),
            indent,
            escape: EscapeKind::CellMagic,
            symbol: symbol.to_string(),
            rest: rest.trim_start().to_string(),
        };
    }

    match LINE_SPLIT.captures(line) {
        Some(caps) => {
            let escape = caps
                .get(2)
                .map(|m| EscapeKind::from_token(m.as_str()))
                .unwrap_or(EscapeKind::None);
            LineInfo {
                line: line.to_string(),
                indent,
                escape,
                symbol: caps.get(3).map(|m| m.as_str()).unwrap_or("").to_string(),
                rest: caps
                    .get(4)
                    .map(|m| m.as_str().trim_start())
                    .unwrap_or("")
                    .to_string(),
            }
        }
        None => LineInfo {
            line: line.to_string(),
            indent,
            escape: EscapeKind::None,
            symbol: String::new(),
            rest: String::new(),
        },
    }
}

/// Check whether a line carries a `#` comment outside any string literal.
pub fn has_comment(src: &str) -> bool {
    let chars: Vec<char> = src.chars().collect();
    let mut i = 0;
    // (quote char, is triple)
    let mut delim: Option<(char, bool)> = None;

    while i < chars.len() {
        let c = chars[i];
        match delim {
            None => {
                if c == '#' {
                    return true;
                }
                if c == '\'' || c == '"' {
                    if i + 2 < chars.len() && chars[i + 1] == c && chars[i + 2] == c {
                        delim = Some((c, true));
                        i += 3;
                        continue;
                    }
                    delim = Some((c, false));
                }
            }
            Some((q, triple)) => {
                if c == '\\' {
                    i += 2;
                    continue;
                }
                if c == q {
                    if triple {
                        if i + 2 < chars.len() && chars[i + 1] == q && chars[i + 2] == q {
                            delim = None;
                            i += 3;
                            continue;
                        }
                    } else {
                        delim = None;
                    }
                }
            }
        }
        i += 1;
    }
    false
}
