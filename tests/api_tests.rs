use leap_assistant_backend::error::HandlerError;
use leap_assistant_backend::message::{ChatResponse, ErrorResponse};
use leap_assistant_backend::routes::create_router;
use leap_assistant_backend::services::assistants::Assistants;
use leap_assistant_backend::state::AppState;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Home(String),
    Recipe(String, Vec<Value>),
    Shopping(String),
    General(String),
}

/// Records every call; fails all of them when `fail` is set.
#[derive(Default)]
struct RecordingAssistants {
    calls: Mutex<Vec<Call>>,
    fail: bool,
}

impl RecordingAssistants {
    fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }

    fn record(&self, call: Call, reply: &str) -> Result<String, HandlerError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            Err(HandlerError::Other("assistant exploded".to_string()))
        } else {
            Ok(reply.to_string())
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Assistants for RecordingAssistants {
    async fn home_assistant_response(&self, message: &str) -> Result<String, HandlerError> {
        self.record(Call::Home(message.to_string()), "home reply")
    }

    async fn recipe_chat_response(&self, message: &str, chat_history: &[Value]) -> Result<String, HandlerError> {
        self.record(Call::Recipe(message.to_string(), chat_history.to_vec()), "recipe reply")
    }

    async fn categorize_items(&self, message: &str) -> Result<String, HandlerError> {
        self.record(Call::Shopping(message.to_string()), "shopping reply")
    }

    async fn general_chat_response(&self, message: &str) -> Result<String, HandlerError> {
        self.record(Call::General(message.to_string()), "general reply")
    }
}

fn app(assistants: Arc<RecordingAssistants>) -> axum::Router {
    let state = Arc::new(AppState::new(assistants));
    create_router().with_state(state)
}

async fn post_chat(assistants: Arc<RecordingAssistants>, body: &str) -> Response {
    app(assistants)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get(assistants: Arc<RecordingAssistants>, uri: &str) -> Response {
    app(assistants)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_index_welcome() {
    let assistants = Arc::new(RecordingAssistants::default());
    let response = get(assistants.clone(), "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Leap Home Assistant API"));
    assert!(assistants.calls().is_empty());
}

#[tokio::test]
async fn test_clear_session_short_circuits() {
    let assistants = Arc::new(RecordingAssistants::default());
    let response = post_chat(assistants.clone(), r#"{"message": "exit"}"#).await;

    assert_eq!(response.status(), StatusCode::OK);
    let chat_resp: ChatResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(chat_resp.reply, "Chat session cleared.");
    assert!(assistants.calls().is_empty());
}

#[tokio::test]
async fn test_post_routes_home_command() {
    let assistants = Arc::new(RecordingAssistants::default());
    let response = post_chat(assistants.clone(), r#"{"message": "turn on the lamp"}"#).await;

    assert_eq!(response.status(), StatusCode::OK);
    let chat_resp: ChatResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(chat_resp.reply, "home reply");
    assert_eq!(assistants.calls(), vec![Call::Home("turn on the lamp".to_string())]);
}

#[tokio::test]
async fn test_post_passes_history_only_to_recipes() {
    let assistants = Arc::new(RecordingAssistants::default());
    let body = r#"{"message": "  how to make pancakes ", "chat_history": [{"role": "user", "content": "hi"}]}"#;
    let response = post_chat(assistants.clone(), body).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        assistants.calls(),
        vec![Call::Recipe(
            "how to make pancakes".to_string(),
            vec![json!({"role": "user", "content": "hi"})]
        )]
    );

    let assistants = Arc::new(RecordingAssistants::default());
    post_chat(assistants.clone(), r#"{"message": "grocery run", "chat_history": [1, 2]}"#).await;
    assert_eq!(assistants.calls(), vec![Call::Shopping("grocery run".to_string())]);
}

#[tokio::test]
async fn test_post_malformed_body_goes_to_general() {
    let assistants = Arc::new(RecordingAssistants::default());
    let response = post_chat(assistants.clone(), "this is not json").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(assistants.calls(), vec![Call::General(String::new())]);
}

#[tokio::test]
async fn test_post_handler_failure_returns_500() {
    let assistants = Arc::new(RecordingAssistants::failing());
    let response = post_chat(assistants, r#"{"message": "tell me a joke"}"#).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let err: ErrorResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(err.error, "assistant exploded");
}

#[tokio::test]
async fn test_get_without_msg_prompts() {
    let assistants = Arc::new(RecordingAssistants::default());
    let response = get(assistants.clone(), "/chat").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("?msg=your question"));
    assert!(assistants.calls().is_empty());

    let response = get(assistants.clone(), "/chat?msg=%20%20").await;
    assert!(body_text(response).await.contains("?msg=your question"));
    assert!(assistants.calls().is_empty());
}

#[tokio::test]
async fn test_get_routes_recipe_with_empty_history() {
    let assistants = Arc::new(RecordingAssistants::default());
    let response = get(assistants.clone(), "/chat?msg=recipe%20for%20pasta").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "🤖 Bot: recipe reply");
    assert_eq!(
        assistants.calls(),
        vec![Call::Recipe("recipe for pasta".to_string(), vec![])]
    );
}

#[tokio::test]
async fn test_get_does_not_clear_session() {
    let assistants = Arc::new(RecordingAssistants::default());
    let response = get(assistants.clone(), "/chat?msg=bye").await;

    assert_eq!(body_text(response).await, "🤖 Bot: general reply");
    assert_eq!(assistants.calls(), vec![Call::General("bye".to_string())]);
}

#[tokio::test]
async fn test_get_handler_failure_is_server_error() {
    let assistants = Arc::new(RecordingAssistants::failing());
    let response = get(assistants, "/chat?msg=hello").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "assistant exploded");
}

#[tokio::test]
async fn test_health() {
    let response = get(Arc::new(RecordingAssistants::default()), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_post_bad_history_still_routes_by_message() {
    let assistants = Arc::new(RecordingAssistants::default());
    let body = r#"{"message": "turn on the lamp", "chat_history": {"a": 1}}"#;
    let response = post_chat(assistants.clone(), body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let chat_resp: ChatResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(chat_resp.reply, "home reply");
    assert_eq!(assistants.calls(), vec![Call::Home("turn on the lamp".to_string())]);
}

#[tokio::test]
async fn test_get_repeated_msg_uses_first() {
    let assistants = Arc::new(RecordingAssistants::default());
    let response = get(assistants.clone(), "/chat?msg=hello&msg=again").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "🤖 Bot: general reply");
    assert_eq!(assistants.calls(), vec![Call::General("hello".to_string())]);
}
