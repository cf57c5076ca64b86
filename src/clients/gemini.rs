use anyhow::Error;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::future::IntoFuture;
use std::time::Duration;

use rig::agent::Agent as RigAgent;
use rig::client::CompletionClient;
use rig::completion::{CompletionError, Prompt, PromptError};
use rig::providers::gemini;
use rig::providers::gemini::completion::CompletionModel;

use crate::clients::{LlmConfig, DEFAULT_LLM_TIMEOUT_SECS};
use crate::generator::prompt::SYSTEM_ROLE;
use crate::generator::{GenerationError, TextGenerator};

static RE_RATE_LIMIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b429\b|\bresource_exhausted\b|\brate[ _-]?limit|\bquota\b").unwrap()
});

/// Gemini backend driven through a single-turn rig agent.
pub struct GeminiClient {
    agent: RigAgent<CompletionModel>,
    model: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig) -> Result<Self, GenerationError> {
        let model = config.model();
        let client = gemini::Client::new(&config.api_key).map_err(Error::from)?;
        let agent = client
            .agent(&model)
            .preamble(SYSTEM_ROLE)
            .temperature(config.temperature())
            .max_tokens(config.max_tokens())
            .build();
        let timeout =
            Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_LLM_TIMEOUT_SECS));
        Ok(Self {
            agent,
            model,
            timeout,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl TextGenerator for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        log::debug!(
            "prompting gemini (model: {}, timeout: {:?})",
            self.model,
            self.timeout
        );
        prompt_within(self.timeout, self.agent.prompt(prompt.to_string())).await
    }
}

/// Awaits a rig prompt, failing with a transport error once `timeout` elapses.
pub async fn prompt_within<F>(timeout: Duration, request: F) -> Result<String, GenerationError>
where
    F: IntoFuture<Output = Result<String, PromptError>>,
{
    match tokio::time::timeout(timeout, request).await {
        Ok(result) => result.map_err(classify_prompt_error),
        Err(_) => Err(GenerationError::Transport(format!(
            "Gemini request timed out after {:?}",
            timeout
        ))),
    }
}

/// Maps a rig prompt failure onto the generation error taxonomy.
pub fn classify_prompt_error(err: PromptError) -> GenerationError {
    match err {
        PromptError::CompletionError(CompletionError::HttpError(err)) => {
            GenerationError::Transport(err.to_string())
        }
        PromptError::CompletionError(CompletionError::ProviderError(body)) => {
            classify_provider_error(&body)
        }
        other => GenerationError::Other(anyhow::anyhow!("Gemini request failed: {}", other)),
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    code: u16,
    #[serde(default)]
    status: Option<String>,
}

/// Classifies the body of a non-2xx Gemini response.
///
/// Google error bodies carry the HTTP status as `error.code`; anything that
/// is not such an envelope falls back to matching rate-limit markers.
pub fn classify_provider_error(body: &str) -> GenerationError {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        let detail = envelope.error;
        if detail.code == 429 || detail.status.as_deref() == Some("RESOURCE_EXHAUSTED") {
            return GenerationError::RateLimited(body.to_string());
        }
        return GenerationError::Api {
            status: detail.code,
            body: body.to_string(),
        };
    }
    if RE_RATE_LIMIT.is_match(body) {
        return GenerationError::RateLimited(body.to_string());
    }
    GenerationError::Other(anyhow::anyhow!("Gemini request failed: {}", body))
}
