use serde_json::Value;

use crate::{
    error::HandlerError,
    services::{
        assistants::Assistants,
        intent::{Intent, detect_intent},
    },
};

/// Call the one assistant responsible for `intent`. Only the recipe assistant
/// sees the chat history.
pub async fn dispatch(
    assistants: &dyn Assistants,
    intent: Intent,
    message: &str,
    chat_history: &[Value],
) -> Result<String, HandlerError> {
    match intent {
        Intent::HomeAssistant => assistants.home_assistant_response(message).await,
        Intent::RecipeAssistant => assistants.recipe_chat_response(message, chat_history).await,
        Intent::ShoppingCategorizer => assistants.categorize_items(message).await,
        Intent::General => assistants.general_chat_response(message).await,
    }
}

/// Classify then dispatch.
pub async fn route_message(
    assistants: &dyn Assistants,
    message: &str,
    chat_history: &[Value],
) -> Result<String, HandlerError> {
    let intent = detect_intent(message);
    tracing::debug!(%intent, "routing chat message");
    dispatch(assistants, intent, message, chat_history).await
}
