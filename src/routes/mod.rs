// src/routes/mod.rs
pub mod chat;

use crate::state::SharedState;
use axum::{Router, routing::get};
use chat::{chat_get_handler, chat_handler, index_handler};
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/chat", get(chat_get_handler).post(chat_handler))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
}
