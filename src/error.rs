use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Language not supported: {0}")]
    UnsupportedLanguage(String),

    #[error("No text to speak")]
    EmptyText,

    #[error("TTS generation failed: {0}")]
    TtsError(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Unknown site variant: {0} (expected 'games' or 'voice-testing')")]
    UnknownSite(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::UnsupportedLanguage(_) => "UNSUPPORTED_LANGUAGE",
            AppError::EmptyText => "EMPTY_TEXT",
            AppError::TtsError(_) => "TTS_ERROR",
            AppError::TemplateNotFound(_) => "TEMPLATE_NOT_FOUND",
            AppError::Http(_) => "HTTP_ERROR",
            AppError::IoError(_) => "IO_ERROR",
            AppError::JsonError(_) => "JSON_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // All failures surface as 500, including rejected language codes.
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let code = self.code();
        let message = self.to_string();

        tracing::error!("Request failed: {} - {}", code, message);

        (
            status,
            Json(ErrorResponse {
                error: message,
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}
