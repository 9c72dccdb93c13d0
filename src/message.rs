// src/message.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CLEAR_SESSION_PHRASES: &[&str] = &["exit", "bye", "clear chat"];
pub const SESSION_CLEARED_REPLY: &str = "Chat session cleared.";

/// Body of `POST /chat`. Every field is optional on the wire.
#[derive(Debug, Default)]
pub struct ChatRequest {
    pub message: Option<String>,
    pub chat_history: Option<Vec<Value>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Query string of `GET /chat`.
#[derive(Debug, Default)]
pub struct ChatQuery {
    pub msg: Option<String>,
}

/// What the request adapter decided to do with an inbound message.
#[derive(Debug, PartialEq)]
pub enum Adapted {
    /// The user asked to clear the session; answer without dispatching.
    ClearSession,
    Dispatch {
        message: String,
        chat_history: Vec<Value>,
    },
}

impl ChatRequest {
    /// Lenient parse: each field falls back to its default on its own, so a
    /// badly typed `chat_history` never costs the `message`.
    pub fn from_body(body: &[u8]) -> Self {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(%err, "unreadable chat body, using defaults");
                return Self::default();
            }
        };

        Self {
            message: value.get("message").and_then(Value::as_str).map(str::to_string),
            chat_history: value.get("chat_history").and_then(Value::as_array).cloned(),
        }
    }

    pub fn adapt(self) -> Adapted {
        let message = self.message.unwrap_or_default().trim().to_string();

        if is_clear_session(&message) {
            return Adapted::ClearSession;
        }

        Adapted::Dispatch {
            message,
            chat_history: self.chat_history.unwrap_or_default(),
        }
    }
}

impl ChatQuery {
    /// First `msg` wins when the parameter is repeated.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let msg = pairs
            .into_iter()
            .find(|(key, _)| key == "msg")
            .map(|(_, value)| value);
        Self { msg }
    }

    /// Trimmed `msg`, or `None` when nothing usable was supplied.
    pub fn message(&self) -> Option<String> {
        let trimmed = self.msg.as_deref().unwrap_or_default().trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

fn is_clear_session(message: &str) -> bool {
    let lowered = message.to_lowercase();
    CLEAR_SESSION_PHRASES.contains(&lowered.as_str())
}
