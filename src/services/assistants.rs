use async_trait::async_trait;
use serde_json::Value;

use crate::{
    config::Config,
    error::HandlerError,
    services::{
        home_devices::{Device, DeviceCommand, DeviceManager},
        llm::{LlmClient, LlmMessage},
        shopping,
    },
};

/// The four assistants a chat message can be routed to. Replies are returned
/// verbatim to the caller.
#[async_trait]
pub trait Assistants: Send + Sync {
    async fn home_assistant_response(&self, message: &str) -> Result<String, HandlerError>;

    async fn recipe_chat_response(&self, message: &str, chat_history: &[Value]) -> Result<String, HandlerError>;

    async fn categorize_items(&self, message: &str) -> Result<String, HandlerError>;

    async fn general_chat_response(&self, message: &str) -> Result<String, HandlerError>;
}

const GENERAL_PROMPT: &str = "You are Leap, a friendly home assistant. Answer briefly and helpfully.";
const HOME_PROMPT: &str = "You are Leap, a smart home assistant controlling a lamp, a ceiling light, the front door, \
a fan and an air conditioner. Answer briefly. If the request is not about these devices, say what you can control.";
const RECIPE_PROMPT: &str = "You are Leap, a cooking assistant. Suggest recipes, list ingredients and explain steps \
clearly. Keep answers concise and use the conversation so far for context.";
const SHOPPING_PROMPT: &str = "You are Leap, a shopping assistant. Extract the items from the user's message and group \
them by store section (Produce, Dairy, Bakery, Meat & Seafood, Pantry, Beverages, Household, Other). \
Answer with one line per section in the form `Section: item, item`.";

const GENERAL_FALLBACK: &str = "I didn't quite catch that. I can control your devices, help with recipes \
or sort a shopping list. What would you like to do?";
const HOME_FALLBACK: &str = "I can turn the lamp, light, fan or air conditioner on and off, open or close the door, \
and report their status. Try \"turn on the lamp\".";
const RECIPE_FALLBACK: &str = "Recipe help needs the language model, which is not configured right now. \
Set MISTRAL_API_KEY and ask again.";

/// Default assistants: deterministic device control and shopping lists, with a
/// language model for free-form answers when an API key is configured.
#[derive(Debug, Clone)]
pub struct LeapAssistants {
    llm: Option<LlmClient>,
    devices: DeviceManager,
}

impl LeapAssistants {
    /// Fails when the language model client cannot be built.
    pub fn new(config: &Config) -> Result<Self, HandlerError> {
        let llm = LlmClient::from_config(config)?;
        if llm.is_none() {
            tracing::warn!("MISTRAL_API_KEY not set, assistants run in offline mode");
        }
        Ok(Self { llm, devices: DeviceManager::new() })
    }

    pub fn devices(&self) -> &DeviceManager {
        &self.devices
    }

    async fn ask(&self, system: &str, history: &[Value], message: &str) -> Option<Result<String, HandlerError>> {
        let llm = self.llm.as_ref()?;

        let mut messages = vec![LlmMessage::system(system)];
        messages.extend(history.iter().filter_map(LlmMessage::from_history));
        messages.push(LlmMessage::user(message));

        Some(llm.complete(&messages).await)
    }
}

#[async_trait]
impl Assistants for LeapAssistants {
    async fn home_assistant_response(&self, message: &str) -> Result<String, HandlerError> {
        let msg_lower = message.to_lowercase();
        let device = Device::detect(&msg_lower);

        if let Some(command) = DeviceCommand::detect(&msg_lower) {
            if let Some(reply) = self.devices.execute(device, command).await {
                tracing::debug!(?device, ?command, "device command executed");
                return Ok(reply);
            }
        }

        match self.ask(HOME_PROMPT, &[], message).await {
            Some(answer) => answer,
            None => Ok(HOME_FALLBACK.to_string()),
        }
    }

    async fn recipe_chat_response(&self, message: &str, chat_history: &[Value]) -> Result<String, HandlerError> {
        match self.ask(RECIPE_PROMPT, chat_history, message).await {
            Some(answer) => answer,
            None => Ok(RECIPE_FALLBACK.to_string()),
        }
    }

    async fn categorize_items(&self, message: &str) -> Result<String, HandlerError> {
        match self.ask(SHOPPING_PROMPT, &[], message).await {
            Some(answer) => answer,
            None => Ok(shopping::categorize_message(message)),
        }
    }

    async fn general_chat_response(&self, message: &str) -> Result<String, HandlerError> {
        match self.ask(GENERAL_PROMPT, &[], message).await {
            Some(answer) => answer,
            None => Ok(GENERAL_FALLBACK.to_string()),
        }
    }
}
