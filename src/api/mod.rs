pub mod handlers;
pub mod pages;
pub mod routes;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LetterResponse {
    pub letter: char,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
