//! Help-suffix rewriting
//!
//! Lines ending in `?` or `??` on a dotted identifier become help calls.
//! Lines with a trailing comment are left alone; `?` inside a comment is not
//! a query.

use once_cell::sync::Lazy;
use regex::Regex;

use super::rewrite::make_help_call;
use super::transformer::StatelessTransformer;
use crate::splitline::has_comment;

// optional %/%% prefix, dotted identifier (wildcards allowed), ? or ?? at end
static HELP_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(%{0,2}[a-zA-Z_*][\w*]*(?:\.[a-zA-Z_*][\w*]*)*)(\?\??)$")
        .expect("help suffix pattern is valid")
});

static INITIAL_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*").expect("initial space pattern is valid"));

/// Rewrite a trailing `?`/`??` query; any non-matching line is returned
/// unchanged.
pub fn rewrite_help_suffix(line: &str) -> String {
    let caps = match HELP_END.captures(line) {
        Some(caps) => caps,
        None => return line.to_string(),
    };
    if has_comment(line) {
        return line.to_string();
    }
    let target = &caps[1];
    let esc = &caps[2];
    let lspace = INITIAL_SPACE.find(line).map(|m| m.as_str()).unwrap_or("");

    // Mid-statement query: hand the statement (minus the query suffix) back
    // to the prompt for the user to keep editing.
    let next_input = if line.trim() != &caps[0] {
        Some(line.trim_end_matches('?'))
    } else {
        None
    };

    make_help_call(target, esc, lspace, next_input)
}

/// The help-suffix stage, as a stateless pipeline transformer.
pub fn help_end() -> StatelessTransformer {
    StatelessTransformer::new(rewrite_help_suffix)
}
