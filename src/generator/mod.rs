pub mod prompt;
pub mod title;

use std::future::Future;

use prompt::build_prompt;
use title::extract_title;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Rate limit reached on the text-generation API: {0}")]
    RateLimited(String),
    #[error("Text-generation API error (status {status}): {body}")]
    Api { status: u16, body: String },
    #[error("Text-generation request failed: {0}")]
    Transport(String),
    #[error("Text-generation API returned no content")]
    EmptyResponse,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GenerationError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GenerationError::RateLimited(_))
    }
}

/// A text-generation backend: sends the prompt as the user turn under a
/// fixed system role and returns the model's reply.
pub trait TextGenerator {
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, GenerationError>>;
}

/// A generated article body and the title extracted from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub body: String,
}

impl Draft {
    pub fn from_text(body: String) -> Self {
        let title = extract_title(&body);
        Self { title, body }
    }
}

pub struct DraftGenerator<G> {
    backend: G,
}

impl<G: TextGenerator> DraftGenerator<G> {
    pub fn new(backend: G) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &G {
        &self.backend
    }

    pub async fn generate(&self, keyword: &str) -> Result<Draft, GenerationError> {
        let prompt = build_prompt(keyword);
        log::info!("sending prompt to model (keyword: {})", keyword);
        let text = self.backend.complete(&prompt).await?;
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        let draft = Draft::from_text(text);
        log::info!("received draft titled '{}'", draft.title);
        Ok(draft)
    }
}
