use std::sync::Arc;

use leap_assistant_backend::{
    config::Config,
    routes,
    services::assistants::LeapAssistants,
    state::AppState,
};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment must be fully loaded before anything starts serving.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leap_assistant_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let assistants = Arc::new(LeapAssistants::new(&config)?);
    let state = Arc::new(AppState::new(assistants));

    let cors = CorsLayer::very_permissive();

    let app = routes::create_router()
        .with_state(state)
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;

    tracing::info!("🚀 Leap assistant running at http://{}", config.bind_addr());
    axum::serve(listener, app).await?;

    Ok(())
}
