use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
};
use crate::{
    error::AppError,
    message::{Adapted, ChatQuery, ChatRequest, ChatResponse, SESSION_CLEARED_REPLY},
    services::dispatch::route_message,
    state::SharedState,
};

pub const WELCOME: &str =
    "✅ Hello, this is the Leap Home Assistant API. Use /chat endpoint with POST requests, or test GET using ?msg=";
pub const GET_USAGE: &str = "❌ Please provide a message using '?msg=your question' in the URL.";
pub const GET_REPLY_PREFIX: &str = "🤖 Bot: ";

pub async fn index_handler() -> &'static str {
    WELCOME
}

// The body is read raw so that malformed JSON falls back to an empty request
// instead of being rejected by the extractor.
pub async fn chat_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let (message, chat_history) = match ChatRequest::from_body(&body).adapt() {
        Adapted::ClearSession => {
            return Ok(Json(ChatResponse { reply: SESSION_CLEARED_REPLY.to_string() }));
        }
        Adapted::Dispatch { message, chat_history } => (message, chat_history),
    };

    let reply = route_message(state.assistants.as_ref(), &message, &chat_history).await?;

    Ok(Json(ChatResponse { reply }))
}

// Browser-friendly variant: plain text, no history, no clear-session phrases.
pub async fn chat_get_handler(
    State(state): State<SharedState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<String, (StatusCode, String)> {
    let Some(message) = ChatQuery::from_pairs(pairs).message() else {
        return Ok(GET_USAGE.to_string());
    };

    match route_message(state.assistants.as_ref(), &message, &[]).await {
        Ok(reply) => Ok(format!("{}{}", GET_REPLY_PREFIX, reply)),
        Err(err) => {
            tracing::error!(error = %err, "GET chat request failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))
        }
    }
}
