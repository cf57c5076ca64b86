//! Flat-file storage for generated drafts.
//!
//! Drafts are written as `<drafts_dir>/<YYYY-MM-DD>-<slug>.md`. Because every
//! name starts with an ISO date, the lexicographically last file is the most
//! recent draft. The extracted title of the last generated draft is kept in a
//! separate file so the publisher does not have to recover it from the slug;
//! it is only trusted when its slug matches the draft being published.
//!
//! Drafts are never overwritten. A second draft with the same date and slug
//! gets a `_02`, `_03`, ... suffix, which sorts after the unsuffixed name.

use anyhow::Context;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::deserialize_option_string;
use crate::generator::title::slugify;
use crate::generator::Draft;

static RE_DATE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}-?").unwrap());
static RE_COPY_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"_\d{2}$").unwrap());

const MAX_COPIES: u32 = 99;

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("No drafts found in {0}")]
    NotFound(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct StorageConfig {
    #[serde(rename = "keywords_path", default, deserialize_with = "deserialize_option_string")]
    pub keywords_path: Option<String>,
    #[serde(rename = "posted_path", default, deserialize_with = "deserialize_option_string")]
    pub posted_path: Option<String>,
    #[serde(rename = "drafts_dir", default, deserialize_with = "deserialize_option_string")]
    pub drafts_dir: Option<String>,
    #[serde(rename = "title_path", default, deserialize_with = "deserialize_option_string")]
    pub title_path: Option<String>,
}

impl StorageConfig {
    pub fn keywords_path(&self) -> PathBuf {
        PathBuf::from(self.keywords_path.as_deref().unwrap_or("keywords.csv"))
    }

    pub fn posted_path(&self) -> PathBuf {
        PathBuf::from(self.posted_path.as_deref().unwrap_or("posted_keywords.txt"))
    }

    pub fn drafts_dir(&self) -> PathBuf {
        PathBuf::from(self.drafts_dir.as_deref().unwrap_or("posts"))
    }

    pub fn title_path(&self) -> PathBuf {
        PathBuf::from(self.title_path.as_deref().unwrap_or("latest_title.txt"))
    }
}

/// A draft read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDraft {
    pub path: PathBuf,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct DraftStore {
    drafts_dir: PathBuf,
    title_path: PathBuf,
}

impl DraftStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            drafts_dir: config.drafts_dir(),
            title_path: config.title_path(),
        }
    }

    pub fn drafts_dir(&self) -> &Path {
        &self.drafts_dir
    }

    /// Writes the draft body and records its title. Returns the draft path.
    pub fn save(&self, draft: &Draft, date: NaiveDate) -> Result<PathBuf, DraftError> {
        fs::create_dir_all(&self.drafts_dir)
            .with_context(|| format!("Creating {}", self.drafts_dir.display()))?;

        let path = self.create_draft_file(draft, date)?;
        log::info!("wrote draft to {}", path.display());

        if let Some(parent) = self.title_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Creating {}", parent.display()))?;
        }
        fs::write(&self.title_path, &draft.title)
            .with_context(|| format!("Writing {}", self.title_path.display()))?;
        log::debug!("wrote title to {}", self.title_path.display());

        Ok(path)
    }

    fn create_draft_file(&self, draft: &Draft, date: NaiveDate) -> Result<PathBuf, DraftError> {
        let base = draft_file_name(&draft.title, date);
        for copy in 1..=MAX_COPIES {
            let name = if copy == 1 {
                base.clone()
            } else {
                copy_file_name(&base, copy)
            };
            let path = self.drafts_dir.join(name);
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                    log::debug!("{} already exists", path.display());
                    continue;
                }
                Err(err) => {
                    return Err(anyhow::Error::new(err)
                        .context(format!("Creating {}", path.display()))
                        .into())
                }
            };
            file.write_all(draft.body.as_bytes())
                .with_context(|| format!("Writing {}", path.display()))?;
            return Ok(path);
        }
        Err(anyhow::anyhow!(
            "Too many drafts named {} in {}",
            base,
            self.drafts_dir.display()
        )
        .into())
    }

    /// The lexicographically last `*.md` file in the drafts directory.
    pub fn latest(&self) -> Result<PathBuf, DraftError> {
        if !self.drafts_dir.is_dir() {
            return Err(DraftError::NotFound(self.drafts_dir.display().to_string()));
        }

        let mut latest: Option<PathBuf> = None;
        for entry in WalkDir::new(&self.drafts_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(_) => continue,
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
                continue;
            }
            let is_later = latest
                .as_ref()
                .map(|current| path.file_name() > current.file_name())
                .unwrap_or(true);
            if is_later {
                latest = Some(path.to_path_buf());
            }
        }

        latest.ok_or_else(|| DraftError::NotFound(self.drafts_dir.display().to_string()))
    }

    pub fn load_latest(&self) -> Result<StoredDraft, DraftError> {
        let path = self.latest()?;
        log::info!("using latest draft {}", path.display());
        let body =
            fs::read_to_string(&path).with_context(|| format!("Reading {}", path.display()))?;
        let title = self.resolve_title(&path)?;
        Ok(StoredDraft { path, title, body })
    }

    fn resolve_title(&self, draft_path: &Path) -> Result<String, DraftError> {
        if self.title_path.is_file() {
            let title = fs::read_to_string(&self.title_path)
                .with_context(|| format!("Reading {}", self.title_path.display()))?;
            let title = title.trim();
            if !title.is_empty() && title_matches_file(title, draft_path) {
                return Ok(title.to_string());
            }
            log::debug!(
                "stored title '{}' does not belong to {}",
                title,
                draft_path.display()
            );
        }
        log::debug!("deriving title from {}", draft_path.display());
        Ok(title_from_file_name(draft_path))
    }
}

pub fn draft_file_name(title: &str, date: NaiveDate) -> String {
    let slug = slugify(title);
    let slug = if slug.is_empty() { "untitled".to_string() } else { slug };
    format!("{}-{}.md", date.format("%Y-%m-%d"), slug)
}

fn copy_file_name(base: &str, copy: u32) -> String {
    let stem = base.strip_suffix(".md").unwrap_or(base);
    format!("{}_{:02}.md", stem, copy)
}

/// Whether `title` is the title the draft at `path` was saved under.
pub fn title_matches_file(title: &str, path: &Path) -> bool {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let slug = RE_DATE_PREFIX.replace(&stem, "");
    let expected = slugify(title);
    let expected = if expected.is_empty() { "untitled".to_string() } else { expected };
    slug == expected || RE_COPY_SUFFIX.replace(&slug, "") == expected
}

/// File stem with the leading `YYYY-MM-DD-` stripped.
pub fn title_from_file_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let title = RE_DATE_PREFIX.replace(&stem, "").to_string();
    if title.is_empty() {
        stem
    } else {
        title
    }
}
