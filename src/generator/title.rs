//! Title extraction and slug derivation for generated drafts.

use once_cell::sync::Lazy;
use regex::Regex;

pub const UNTITLED: &str = "Untitled";
pub const MAX_SLUG_CHARS: usize = 50;

static RE_MARKDOWN_H1: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#[ \t]+(.+)$").unwrap());
static RE_HTML_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<(?:title|h1)\b[^>]*>(.*?)</(?:title|h1)\s*>").unwrap());
static RE_INNER_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static RE_UNSAFE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

type Matcher = fn(&str) -> Option<String>;

// Tried in order, first match wins.
const MATCHERS: &[Matcher] = &[markdown_heading, html_heading];

pub fn extract_title(text: &str) -> String {
    MATCHERS
        .iter()
        .find_map(|matcher| matcher(text))
        .unwrap_or_else(|| UNTITLED.to_string())
}

fn markdown_heading(text: &str) -> Option<String> {
    RE_MARKDOWN_H1
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .find(|title| !title.is_empty())
}

fn html_heading(text: &str) -> Option<String> {
    RE_HTML_TITLE
        .captures_iter(text)
        .map(|caps| RE_INNER_TAG.replace_all(&caps[1], "").trim().to_string())
        .find(|title| !title.is_empty())
}

/// Reduces a title to word characters and hyphens, at most
/// [`MAX_SLUG_CHARS`] characters long.
pub fn slugify(title: &str) -> String {
    let safe = RE_UNSAFE.replace_all(title, "");
    let joined = RE_WHITESPACE.replace_all(safe.trim(), "-");
    joined.chars().take(MAX_SLUG_CHARS).collect()
}
