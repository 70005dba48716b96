use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod letters;
mod tts;

use api::routes::{create_router, AppState};
use config::Config;
use tts::{GoogleTts, SpeechService};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Configuration from environment
    let config = Config::from_env().expect("Invalid configuration");

    let addr: SocketAddr = config.bind_addr().parse().expect("Invalid address");

    tracing::info!("Hebrew ABC Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Site variant: {}", config.site);
    tracing::info!("Templates directory: {}", config.templates_dir.display());
    tracing::info!("Static directory: {}", config.static_dir.display());

    // Create speech service
    let google = GoogleTts::new(&config.tts_tld, config.tts_timeout)
        .expect("Failed to create TTS client");
    let speech = SpeechService::new(Arc::new(google));

    // Create app state
    let state = Arc::new(AppState { config, speech });

    // Create router
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
