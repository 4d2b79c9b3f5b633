use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use photoparty::{api, cleanup, images, state::AppState};

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "photoparty=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting photoparty...");

    // Initialize the stock photo provider
    let image_config = images::ImageConfig::from_env();
    let image_provider = match image_config.build_provider() {
        Some(provider) => {
            tracing::info!("Image provider {} initialized", provider.name());
            Some(provider)
        }
        None => {
            tracing::warn!(
                "No SHUTTERSTOCK_ACCESS_TOKEN configured. Random images will not be available."
            );
            None
        }
    };

    let state = Arc::new(AppState::new_with_images(image_provider));

    // Spawn background task for sweeping out abandoned lobbies
    cleanup::spawn_lobby_reaper(state.clone(), cleanup::ReaperConfig::from_env());

    let app = api::router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
