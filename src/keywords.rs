//! Topic keyword selection.
//!
//! Keywords come from a flat file (one per line, or the first column of a
//! CSV). Keywords already used by earlier runs live in an append-only log and
//! are excluded from selection while unused ones remain.

use anyhow::Context;
use clap::ValueEnum;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Upper bound for the number of keywords combined in random mode.
pub const MAX_RANDOM_KEYWORDS: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum KeywordError {
    #[error("Keyword source not found: {0}")]
    MissingSource(String),
    #[error("Keyword source is empty: {0}")]
    EmptySource(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// One keyword per calendar day, reproducible.
    #[default]
    Daily,
    /// One to four distinct keywords sampled at random.
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordList {
    keywords: Vec<String>,
}

impl KeywordList {
    pub fn load(path: &Path) -> Result<Self, KeywordError> {
        if !path.exists() {
            return Err(KeywordError::MissingSource(path.display().to_string()));
        }
        let text =
            fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        let keywords = parse_keywords(&text, is_csv);
        log::debug!("loaded {} keywords from {}", keywords.len(), path.display());
        Self::new(keywords).map_err(|_| KeywordError::EmptySource(path.display().to_string()))
    }

    pub fn new(keywords: Vec<String>) -> Result<Self, KeywordError> {
        if keywords.is_empty() {
            return Err(KeywordError::EmptySource("<memory>".to_string()));
        }
        Ok(Self { keywords })
    }

    pub fn as_slice(&self) -> &[String] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Keywords not yet recorded in `posted`. Falls back to the whole list
    /// once every keyword has been used.
    pub fn available<'a>(&'a self, posted: &PostedSet) -> Vec<&'a str> {
        let unused = self
            .keywords
            .iter()
            .filter(|k| !posted.contains(k))
            .map(String::as_str)
            .collect::<Vec<_>>();
        if unused.is_empty() {
            log::warn!("every keyword has already been posted; reusing the full list");
            return self.keywords.iter().map(String::as_str).collect();
        }
        unused
    }
}

fn parse_keywords(text: &str, is_csv: bool) -> Vec<String> {
    text.lines()
        .map(|line| {
            if is_csv {
                line.split(',').next().unwrap_or_default()
            } else {
                line
            }
        })
        .map(|value| value.trim().trim_matches('"').trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Keywords used by earlier runs. Only ever appended to.
#[derive(Debug, Clone)]
pub struct PostedSet {
    path: PathBuf,
    entries: HashSet<String>,
}

impl PostedSet {
    /// Loads the posted log, treating a missing file as empty.
    pub fn load(path: &Path) -> Result<Self, KeywordError> {
        let entries = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("Reading {}", path.display()))?
                .lines()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty())
                .collect()
        } else {
            HashSet::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.entries.contains(keyword)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn append(&mut self, keyword: &str) -> Result<(), KeywordError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Creating {}", parent.display()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Opening {}", self.path.display()))?;
        writeln!(file, "{}", keyword)
            .with_context(|| format!("Appending to {}", self.path.display()))?;
        self.entries.insert(keyword.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub keywords: Vec<String>,
}

impl Selection {
    /// The keyword string substituted into the prompt.
    pub fn phrase(&self) -> String {
        self.keywords.join(", ")
    }
}

/// Picks `available[day % len]`, with `day` being the 1-based day of month.
pub fn select_daily(available: &[&str], day: u32) -> Selection {
    let index = day as usize % available.len();
    Selection {
        keywords: vec![available[index].to_string()],
    }
}

pub fn select_random<R: Rng>(available: &[&str], rng: &mut R) -> Selection {
    let count = rng.gen_range(1..=MAX_RANDOM_KEYWORDS).min(available.len());
    Selection {
        keywords: available
            .choose_multiple(rng, count)
            .map(|k| k.to_string())
            .collect(),
    }
}

pub fn select<R: Rng>(
    mode: SelectionMode,
    available: &[&str],
    day: u32,
    rng: &mut R,
) -> Selection {
    match mode {
        SelectionMode::Daily => select_daily(available, day),
        SelectionMode::Random => select_random(available, rng),
    }
}
