pub mod gemini;
pub mod openai;
pub mod wordpress;

use crate::config::{ConfigError, ENV_PREFIX};
use serde::{Deserialize, Deserializer};

pub const DEFAULT_MAX_TOKENS: u64 = 2000;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    OpenAi,
    Gemini,
}

impl Provider {
    pub fn default_model(self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-4-0613",
            Provider::Gemini => "gemini-2.5-flash",
        }
    }
}

fn deserialize_provider<'de, D>(deserializer: D) -> Result<Provider, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(Provider::default()),
        Some(v) if v.eq_ignore_ascii_case("openai") => Ok(Provider::OpenAi),
        Some(v) if v.eq_ignore_ascii_case("gemini") => Ok(Provider::Gemini),
        Some(v) => Err(serde::de::Error::custom(format!(
            "unknown LLM provider '{}': expected 'openai' or 'gemini'",
            v
        ))),
    }
}

/// Settings for the text-generation service, read only by `generate`.
#[derive(Deserialize, Debug, Clone)]
pub struct LlmConfig {
    #[serde(rename = "llm_api_key")]
    pub api_key: String,
    #[serde(
        rename = "llm_provider",
        default,
        deserialize_with = "deserialize_provider"
    )]
    pub provider: Provider,
    #[serde(rename = "llm_model")]
    pub model: Option<String>,
    #[serde(rename = "llm_base_url")]
    pub base_url: Option<String>,
    #[serde(rename = "llm_max_tokens")]
    pub max_tokens: Option<u64>,
    #[serde(rename = "llm_temperature")]
    pub temperature: Option<f64>,
    #[serde(rename = "llm_timeout_secs")]
    pub timeout_secs: Option<u64>,
}

impl LlmConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = envy::prefixed(ENV_PREFIX).from_env::<LlmConfig>()?;
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::Missing(format!("{}LLM_API_KEY", ENV_PREFIX)));
        }
        Ok(config)
    }

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            provider: Provider::default(),
            model: None,
            base_url: None,
            max_tokens: None,
            temperature: None,
            timeout_secs: None,
        }
    }

    pub fn model(&self) -> String {
        self.model
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| self.provider.default_model().to_string())
    }

    pub fn max_tokens(&self) -> u64 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    pub fn temperature(&self) -> f64 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }
}
