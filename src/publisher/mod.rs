pub mod markup;
pub mod payload;
pub mod sanitize;

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{deserialize_option_string, deserialize_option_usize};
use crate::drafts::{DraftError, DraftStore, StoredDraft};
use markup::markdown_to_html;
use payload::{truncate_content, Payload, PostStatus, SeoMeta};
use sanitize::sanitize_html;

pub const DEFAULT_MAX_CONTENT_CHARS: usize = 9000;
const PREVIEW_CHARS: usize = 500;

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PublishConfig {
    #[serde(
        rename = "max_content_chars",
        default,
        deserialize_with = "deserialize_option_usize"
    )]
    pub max_content_chars: Option<usize>,
    #[serde(rename = "site_name", default, deserialize_with = "deserialize_option_string")]
    pub site_name: Option<String>,
    #[serde(rename = "payload_path", default, deserialize_with = "deserialize_option_string")]
    pub payload_path: Option<String>,
}

impl PublishConfig {
    pub fn max_content_chars(&self) -> usize {
        self.max_content_chars.unwrap_or(DEFAULT_MAX_CONTENT_CHARS)
    }

    pub fn payload_path(&self) -> PathBuf {
        PathBuf::from(self.payload_path.as_deref().unwrap_or("payload.json"))
    }
}

pub struct Publisher {
    store: DraftStore,
    config: PublishConfig,
}

impl Publisher {
    pub fn new(store: DraftStore, config: PublishConfig) -> Self {
        Self { store, config }
    }

    /// Builds the payload for the most recent draft.
    pub fn prepare(&self) -> Result<Payload, PublishError> {
        let draft = self.store.load_latest()?;
        Ok(self.build_payload(&draft))
    }

    pub fn build_payload(&self, draft: &StoredDraft) -> Payload {
        let html = markdown_to_html(&draft.body);
        let sanitized = sanitize_html(&html);
        let max_chars = self.config.max_content_chars();
        let content = truncate_content(&sanitized, max_chars);
        if content.len() != sanitized.len() {
            log::warn!("content exceeds {} characters; truncated", max_chars);
        }

        let meta = self
            .config
            .site_name
            .as_deref()
            .map(|site| SeoMeta::new(&draft.title, site, &draft.body));

        Payload {
            title: draft.title.clone(),
            content,
            status: PostStatus::Publish,
            meta,
        }
    }
}

pub fn write_payload(payload: &Payload, path: &Path) -> Result<(), PublishError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("Creating {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(payload).context("Serializing payload")?;
    fs::write(path, json).with_context(|| format!("Writing {}", path.display()))?;
    log::info!("wrote payload to {}", path.display());
    Ok(())
}

/// Short human-readable summary of a payload for dry runs.
pub fn preview(payload: &Payload) -> String {
    let mut content = payload
        .content
        .chars()
        .take(PREVIEW_CHARS)
        .collect::<String>();
    if payload.content.chars().count() > PREVIEW_CHARS {
        content.push_str("...");
    }
    let mut out = format!("Title: {}\nStatus: publish\n", payload.title);
    if let Some(meta) = &payload.meta {
        out.push_str(&format!("SEO title: {}\n", meta.title));
        out.push_str(&format!("SEO description: {}\n", meta.description));
    }
    out.push_str(&format!("\n{}", content));
    out
}
