use std::env::{self, VarError};

use log::{debug, error, info};

use crate::error::Result;

const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key))
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, VarError>,
    {
        let required = |key: &str| {
            lookup(key).map_err(|e| {
                error!("Failed to load {key} from environment: {e}");
                e
            })
        };
        let optional = |key: &str, default: &str| match lookup(key) {
            Ok(value) if !value.trim().is_empty() => value,
            _ => default.to_string(),
        };

        let discord_token = required("DISCORD_TOKEN")?;
        let openai_api_key = required("OPENAI_API_KEY")?;
        let openai_model = optional("OPENAI_MODEL", DEFAULT_OPENAI_MODEL);
        let openai_base_url = optional("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        info!("Configuration loaded successfully");
        debug!("Discord token length: {} characters", discord_token.len());
        debug!(
            "OpenAI API key length: {} characters",
            openai_api_key.len()
        );
        debug!("OpenAI model: {openai_model}");
        debug!("OpenAI base URL: {openai_base_url}");

        Ok(Self {
            discord_token,
            openai_api_key,
            openai_model,
            openai_base_url,
        })
    }
}
