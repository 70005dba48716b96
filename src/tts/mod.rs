pub mod google;
pub mod language;
pub mod tokenizer;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppError;

pub use google::GoogleTts;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    pub text: String,
    /// Backend language code, already resolved.
    pub lang: String,
    pub slow: bool,
}

/// Turns text into MP3 audio written to `path`.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn save(&self, request: &SpeechRequest, path: &Path) -> Result<(), AppError>;
}

pub struct SpeechService {
    synthesizer: Arc<dyn Synthesizer>,
}

impl SpeechService {
    pub fn new(synthesizer: Arc<dyn Synthesizer>) -> Self {
        Self { synthesizer }
    }

    pub async fn speak(&self, text: &str, lang: &str) -> Result<Vec<u8>, AppError> {
        // 1. Scoped temp file, removed when `audio_file` drops
        let audio_file = tempfile::Builder::new()
            .prefix("speech-")
            .suffix(".mp3")
            .tempfile()?;

        // 2. Resolve language
        let request = SpeechRequest {
            text: text.to_string(),
            lang: language::resolve(lang).to_string(),
            slow: false,
        };

        tracing::debug!(
            "Speech request: lang '{}' -> '{}', file {}",
            lang,
            request.lang,
            audio_file.path().display()
        );

        // 3. Synthesize into the file
        self.synthesizer.save(&request, audio_file.path()).await?;

        // 4. Read it back
        let audio = tokio::fs::read(audio_file.path()).await?;
        if audio.is_empty() {
            return Err(AppError::TtsError("Synthesizer produced no audio".into()));
        }

        Ok(audio)
    }
}
