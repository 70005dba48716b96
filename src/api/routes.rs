use axum::{
    extract::State,
    http::{header, Method},
    routing::{get, MethodRouter},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers;
use super::pages::{self, Page};
use crate::config::Config;
use crate::tts::SpeechService;

pub struct AppState {
    pub config: Config,
    pub speech: SpeechService,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    let site = state.config.site;
    let mut router = Router::new().route("/", page_route(Page::home(site)));
    for &(path, page) in Page::games(site) {
        router = router.route(path, page_route(page));
    }

    router
        .route("/generate-letter", get(handlers::generate_letter))
        .route("/speak/:text/:lang", get(handlers::speak))
        .route("/health", get(handlers::health))
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn page_route(page: Page) -> MethodRouter<Arc<AppState>> {
    get(move |State(state): State<Arc<AppState>>| async move {
        pages::render(&state.config.templates_dir, page).await
    })
}
