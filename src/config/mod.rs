use crate::error::RelayError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

/// Model used when `RELAY_TEXT_MODEL` is not set.
const DEFAULT_TEXT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    #[serde(flatten)]
    pub common: CommonConfig,
    #[serde(default)]
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommonConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeminiSettings {
    /// API key for the Gemini API. May be empty: startup continues and
    /// generate calls fail upstream instead.
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub model: String,
}

impl RelayConfig {
    pub fn load() -> Result<Self, RelayError> {
        dotenvy::dotenv().ok();

        let common = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(RelayConfig {
            common,
            gemini: GeminiSettings {
                api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
                model: env::var("RELAY_TEXT_MODEL")
                    .unwrap_or_else(|_| DEFAULT_TEXT_MODEL.to_string()),
            },
        })
    }
}
