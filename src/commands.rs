//! The two pipeline entry points: `generate` writes a draft, `publish` turns
//! the latest draft into a payload and emits it.

use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use rand::Rng;
use std::path::PathBuf;

use crate::clients::wordpress::{PublishedPost, WordPressClient, WordPressConfig};
use crate::config::AppConfig;
use crate::drafts::DraftStore;
use crate::generator::{DraftGenerator, TextGenerator};
use crate::keywords::{self, KeywordList, PostedSet, SelectionMode};
use crate::publisher::payload::Payload;
use crate::publisher::{self, Publisher};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutcome {
    pub keyword: String,
    pub title: String,
    pub path: PathBuf,
}

pub async fn generate<G, R>(
    config: &AppConfig,
    generator: &DraftGenerator<G>,
    mode: SelectionMode,
    today: NaiveDate,
    rng: &mut R,
) -> anyhow::Result<GenerateOutcome>
where
    G: TextGenerator,
    R: Rng,
{
    let keyword_list = KeywordList::load(&config.storage.keywords_path())
        .context("Loading keyword source")?;
    let mut posted = PostedSet::load(&config.storage.posted_path())
        .context("Loading posted keywords")?;

    let available = keyword_list.available(&posted);
    log::info!(
        "{} of {} keywords available ({} already posted)",
        available.len(),
        keyword_list.len(),
        posted.len()
    );
    let selection = keywords::select(mode, &available, today.day(), rng);
    let keyword = selection.phrase();
    log::info!("selected keyword: {}", keyword);

    let draft = generator.generate(&keyword).await?;
    let store = DraftStore::new(&config.storage);
    let path = store.save(&draft, today)?;

    for used in &selection.keywords {
        posted.append(used).context("Recording posted keyword")?;
    }

    Ok(GenerateOutcome {
        keyword,
        title: draft.title,
        path,
    })
}

/// Builds the payload for the latest draft and writes it to the configured
/// payload path.
pub fn publish_to_file(config: &AppConfig) -> anyhow::Result<(Payload, PathBuf)> {
    let payload = prepare_payload(config)?;
    let path = config.publish.payload_path();
    publisher::write_payload(&payload, &path)?;
    Ok((payload, path))
}

/// Builds the payload for the latest draft and submits it to WordPress.
pub async fn publish_to_wordpress(
    config: &AppConfig,
    wordpress: WordPressConfig,
) -> anyhow::Result<(Payload, PublishedPost)> {
    let client = WordPressClient::new(wordpress)?;
    let payload = prepare_payload(config)?;
    let post = client
        .submit(&payload)
        .await
        .context("Failed to post to WordPress")?;
    Ok((payload, post))
}

fn prepare_payload(config: &AppConfig) -> anyhow::Result<Payload> {
    let store = DraftStore::new(&config.storage);
    let publisher = Publisher::new(store, config.publish.clone());
    Ok(publisher.prepare()?)
}
