use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::{HealthResponse, LetterResponse};
use crate::api::routes::AppState;
use crate::error::AppError;
use crate::letters;

pub async fn generate_letter() -> Json<LetterResponse> {
    Json(LetterResponse {
        letter: letters::random_letter(),
    })
}

pub async fn speak(
    State(state): State<Arc<AppState>>,
    Path((text, lang)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let audio = state.speech.speak(&text, &lang).await?;

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "audio/mpeg")], audio).into_response())
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
