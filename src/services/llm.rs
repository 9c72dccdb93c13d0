use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{config::Config, error::HandlerError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmMessage {
    pub role: String,
    pub content: String,
}

impl LlmMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }

    /// Reads a prior chat turn. Only `{"role": "user"|"assistant", "content": "..."}`
    /// records are usable; anything else is skipped.
    pub fn from_history(turn: &Value) -> Option<Self> {
        let role = turn.get("role")?.as_str()?;
        let content = turn.get("content")?.as_str()?;
        match role {
            "user" | "assistant" => Some(Self { role: role.to_string(), content: content.to_string() }),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [LlmMessage],
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: LlmMessage,
}

/// Client for a Mistral-compatible chat completions endpoint.
#[derive(Debug, Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
}

impl LlmClient {
    /// `Ok(None)` when no API key is configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>, HandlerError> {
        let Some(api_key) = config.mistral_api_key.clone() else {
            return Ok(None);
        };
        let http = reqwest::Client::builder()
            .timeout(config.llm_timeout)
            .build()?;

        Ok(Some(Self {
            http,
            api_key,
            model: config.mistral_model.clone(),
            url: config.mistral_api_url.clone(),
        }))
    }

    pub async fn complete(&self, messages: &[LlmMessage]) -> Result<String, HandlerError> {
        let body = CompletionRequest { model: &self.model, messages };

        let res = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(HandlerError::Upstream { status: status.as_u16(), body });
        }

        let parsed: CompletionResponse = res.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(HandlerError::EmptyResponse)
    }
}
