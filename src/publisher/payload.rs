use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const TRUNCATION_NOTICE: &str = "<p>(truncated)</p>";
pub const MAX_DESCRIPTION_CHARS: usize = 120;

static RE_HEADING_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*#+[ \t]*").unwrap());
static RE_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n]+").unwrap());

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Publish,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SeoMeta {
    #[serde(rename = "_aioseo_title")]
    pub title: String,
    #[serde(rename = "_aioseo_description")]
    pub description: String,
}

impl SeoMeta {
    pub fn new(title: &str, site_name: &str, markdown: &str) -> Self {
        Self {
            title: format!("{} | {}", title, site_name),
            description: describe(markdown),
        }
    }
}

/// The body submitted to (or written in place of) the posts endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<SeoMeta>,
}

/// Cuts `content` to `max_chars` characters and appends the truncation notice.
/// Content at or under the limit is returned unchanged.
pub fn truncate_content(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        return content.to_string();
    }
    let mut truncated = content.chars().take(max_chars).collect::<String>();
    truncated.push_str(TRUNCATION_NOTICE);
    truncated
}

/// Plain-text description: heading markers and line breaks removed, capped at
/// [`MAX_DESCRIPTION_CHARS`].
pub fn describe(markdown: &str) -> String {
    let without_headings = RE_HEADING_MARKER.replace_all(markdown, "");
    let single_line = RE_NEWLINES.replace_all(&without_headings, " ");
    single_line
        .trim()
        .chars()
        .take(MAX_DESCRIPTION_CHARS)
        .collect::<String>()
        .trim_end()
        .to_string()
}
