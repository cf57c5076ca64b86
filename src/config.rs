use crate::drafts::StorageConfig;
use crate::publisher::PublishConfig;
use serde::{Deserialize, Deserializer};

pub const ENV_PREFIX: &str = "AUTOPOST_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Env(#[from] envy::Error),
    #[error("Missing required configuration: {0}")]
    Missing(String),
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AppConfig {
    #[serde(flatten)]
    pub storage: StorageConfig,
    #[serde(flatten)]
    pub publish: PublishConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(envy::prefixed(ENV_PREFIX).from_env::<AppConfig>()?)
    }
}

// Flattened structs receive every env value as a string, so numeric fields
// need an explicit parse.
pub(crate) fn deserialize_option_usize<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    if let Some(s) = s {
        s.trim()
            .parse::<usize>()
            .map(Some)
            .map_err(serde::de::Error::custom)
    } else {
        Ok(None)
    }
}

pub(crate) fn deserialize_option_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()))
}
