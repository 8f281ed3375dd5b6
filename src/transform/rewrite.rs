//! Canonical rewrite forms emitted toward the evaluator
//!
//! Each escape kind maps to one textual call form. Command text is embedded
//! as a quoted string literal in the target language's `repr` style.

use crate::splitline::{EscapeKind, LineInfo};

/// Quote `s` as a single-quoted string literal, switching to double quotes
/// when the text itself contains a single quote and no double quote.
pub(crate) fn py_repr(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Build the help-display call for a `?`/`??` query.
///
/// `next_input`, when present, re-populates the prompt with the statement the
/// help suffix was clipped from so the user can keep editing it.
pub(crate) fn make_help_call(
    target: &str,
    esc: &str,
    lspace: &str,
    next_input: Option<&str>,
) -> String {
    let method = if esc == "??" {
        "pinfo2"
    } else if target.contains('*') {
        "psearch"
    } else {
        "pinfo"
    };
    let arg = format!("{} {}", method, target);
    match next_input {
        None => format!("{}get_ipython().magic({})", lspace, py_repr(&arg)),
        Some(next) => format!(
            "{}get_ipython().set_next_input({});get_ipython().magic({})",
            lspace,
            py_repr(next),
            py_repr(&arg)
        ),
    }
}

/// `!cmd` - run a shell command
pub(crate) fn shell_exec(info: &LineInfo) -> String {
    let cmd = info.line.trim_start().trim_start_matches('!');
    format!("{}get_ipython().system({})", info.indent, py_repr(cmd))
}

/// `!!cmd` - run a shell command, capturing output
pub(crate) fn shell_capture(info: &LineInfo) -> String {
    let stripped = info.line.trim_start();
    let cmd = stripped.strip_prefix("!!").unwrap_or(stripped);
    format!("{}get_ipython().getoutput({})", info.indent, py_repr(cmd))
}

/// `?name` / `??name` - object help; a bare `?` fires the usage screen
pub(crate) fn help(info: &LineInfo) -> String {
    if info.symbol.is_empty() {
        return format!("{}get_ipython().show_usage()", info.indent);
    }
    let esc = match info.escape {
        EscapeKind::HelpVerbose => "??",
        _ => "?",
    };
    make_help_call(&info.symbol, esc, &info.indent, None)
}

/// `%magic args` - line magic
pub(crate) fn magic(info: &LineInfo) -> String {
    let cmd = format!("{} {}", info.symbol, info.rest);
    format!(
        "{}get_ipython().magic({})",
        info.indent,
        py_repr(cmd.trim())
    )
}

/// `,f a b` - call with each whitespace-separated argument quoted
pub(crate) fn quote_args(info: &LineInfo) -> String {
    let args: Vec<&str> = info.rest.split_whitespace().collect();
    format!(
        "{}{}(\"{}\")",
        info.indent,
        info.symbol,
        args.join("\", \"")
    )
}

/// `;f rest` - call with the whole rest quoted as one argument
pub(crate) fn quote_whole(info: &LineInfo) -> String {
    format!("{}{}(\"{}\")", info.indent, info.symbol, info.rest)
}

/// `/f a b` - call with bare arguments
pub(crate) fn paren_call(info: &LineInfo) -> String {
    let args: Vec<&str> = info.rest.split_whitespace().collect();
    format!("{}{}({})", info.indent, info.symbol, args.join(", "))
}
