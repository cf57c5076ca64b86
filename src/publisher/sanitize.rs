//! Denylist HTML filter.
//!
//! This is a textual filter over a fixed set of patterns, not an HTML parser.
//! Nested, malformed, or obfuscated markup (unquoted or single-quoted event
//! handlers, `javascript:` URLs, split tags) passes through untouched.
//!
//! Elements are removed one kind at a time, in [`BLOCKED_ELEMENTS`] order,
//! rather than by a single leftmost match over all kinds. Interleaved blocked
//! elements can therefore leave fragments behind: in
//! `<style><script></style></script>x` the script pass consumes the inner
//! `</style>`, so the style pass finds no closing tag and `<style>x` remains.

use once_cell::sync::Lazy;
use regex::Regex;

pub const BLOCKED_ELEMENTS: &[&str] = &["script", "iframe", "style", "svg"];

// The regex crate has no backreferences, so each element gets its own pattern.
static RE_BLOCKED: Lazy<Vec<Regex>> = Lazy::new(|| {
    BLOCKED_ELEMENTS
        .iter()
        .map(|tag| Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>")).unwrap())
        .collect()
});
static RE_FENCED_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static RE_EVENT_HANDLER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\s+on\w+\s*=\s*"[^"]*""#).unwrap());

pub fn sanitize_html(html: &str) -> String {
    let mut output = html.to_string();
    for re in RE_BLOCKED.iter() {
        output = re.replace_all(&output, "").into_owned();
    }
    output = RE_FENCED_CODE.replace_all(&output, "").into_owned();
    RE_EVENT_HANDLER.replace_all(&output, "").into_owned()
}
