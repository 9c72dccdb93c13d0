// src/config.rs
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,

    // Language model used by the assistants
    pub mistral_api_key: Option<String>,
    pub mistral_model: String,
    pub mistral_api_url: String,
    pub llm_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            mistral_api_key: None,
            mistral_model: "mistral-small-latest".to_string(),
            mistral_api_url: "https://api.mistral.ai/v1/chat/completions".to_string(),
            llm_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Build the configuration from process environment. Call `dotenvy::dotenv()` first
    /// so values from a `.env` file are visible here.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Config::default();

        Ok(Config {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: match env::var("PORT") {
                Ok(port) => port.parse()?,
                Err(_) => defaults.port,
            },

            mistral_api_key: env::var("MISTRAL_API_KEY")
                .ok()
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            mistral_model: env::var("MISTRAL_MODEL").unwrap_or(defaults.mistral_model),
            mistral_api_url: env::var("MISTRAL_API_URL").unwrap_or(defaults.mistral_api_url),
            llm_timeout: match env::var("LLM_TIMEOUT_SECS") {
                Ok(secs) => Duration::from_secs(secs.parse()?),
                Err(_) => defaults.llm_timeout,
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
