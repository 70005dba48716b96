use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::tts::{language, tokenizer, SpeechRequest, Synthesizer};

const RPC_ID: &str = "jQ1olc";

const BATCH_EXECUTE_PATH: &str = "/_/TranslateWebserverUi/data/batchexecute";

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

lazy_static! {
    static ref AUDIO_REGEX: Regex = Regex::new(r#"jQ1olc","\[\\"(.*)\\"]"#).unwrap();
}

/// Speech synthesis through the Google Translate web backend.
pub struct GoogleTts {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTts {
    pub fn new(tld: &str, timeout: Duration) -> Result<Self, AppError> {
        Self::with_base_url(format!("https://translate.google.{}", tld), timeout)
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, BATCH_EXECUTE_PATH)
    }

    async fn synthesize_chunk(
        &self,
        text: &str,
        lang: &str,
        slow: bool,
    ) -> Result<Vec<u8>, AppError> {
        let rpc = package_rpc(text, lang, slow)?;

        let response = self
            .client
            .post(self.endpoint())
            .form(&[("f.req", rpc)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::TtsError(format!(
                "{} from TTS API ({}, lang: {})",
                status, self.base_url, lang
            )));
        }

        let body = response.text().await?;
        extract_audio(&body)
    }
}

#[async_trait]
impl Synthesizer for GoogleTts {
    async fn save(&self, request: &SpeechRequest, path: &Path) -> Result<(), AppError> {
        let lang = request.lang.to_ascii_lowercase();
        if !language::is_supported(&lang) {
            return Err(AppError::UnsupportedLanguage(lang));
        }

        let chunks = tokenizer::tokenize(&request.text);
        if chunks.is_empty() {
            return Err(AppError::EmptyText);
        }

        tracing::debug!(
            "Synthesizing {} chunk(s) in '{}' via {}",
            chunks.len(),
            lang,
            self.base_url
        );

        let mut audio = Vec::new();
        for chunk in &chunks {
            audio.extend(self.synthesize_chunk(chunk, &lang, request.slow).await?);
        }

        tokio::fs::write(path, &audio).await?;
        Ok(())
    }
}

/// Build the `f.req` form value for one chunk of text.
pub fn package_rpc(text: &str, lang: &str, slow: bool) -> Result<String, AppError> {
    let speed = if slow { Value::Bool(true) } else { Value::Null };
    let parameter = serde_json::to_string(&json!([text, lang, speed, "null"]))?;
    let rpc = json!([[[RPC_ID, parameter, null, "generic"]]]);
    Ok(serde_json::to_string(&rpc)?)
}

/// Pull the base64 audio payload out of a batchexecute response and decode it.
pub fn extract_audio(body: &str) -> Result<Vec<u8>, AppError> {
    let mut audio = Vec::new();

    for line in body.lines().filter(|l| l.contains(RPC_ID)) {
        if let Some(cap) = AUDIO_REGEX.captures(line) {
            let decoded = STANDARD
                .decode(&cap[1])
                .map_err(|e| AppError::TtsError(format!("Invalid audio payload: {}", e)))?;
            audio.extend(decoded);
        }
    }

    if audio.is_empty() {
        return Err(AppError::TtsError("No audio stream in TTS API response".into()));
    }

    Ok(audio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn audio_reply(payload: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_string(format!(
            ")]}}'\n\n104\n[[\"wrb.fr\",\"jQ1olc\",\"[\\\"{}\\\"]\",null,null,null,\"generic\"]]\n",
            payload
        ))
    }

    fn request(text: &str, lang: &str) -> SpeechRequest {
        SpeechRequest {
            text: text.into(),
            lang: lang.into(),
            slow: false,
        }
    }

    #[test]
    fn test_package_rpc_normal_speed() {
        let rpc = package_rpc("שלום", "iw", false).unwrap();
        let outer: Value = serde_json::from_str(&rpc).unwrap();
        assert_eq!(outer[0][0][0], "jQ1olc");
        assert_eq!(outer[0][0][3], "generic");

        let parameter: Value = serde_json::from_str(outer[0][0][1].as_str().unwrap()).unwrap();
        assert_eq!(parameter, json!(["שלום", "iw", null, "null"]));
    }

    #[test]
    fn test_package_rpc_slow() {
        let rpc = package_rpc("hello", "en", true).unwrap();
        let outer: Value = serde_json::from_str(&rpc).unwrap();
        let parameter: Value = serde_json::from_str(outer[0][0][1].as_str().unwrap()).unwrap();
        assert_eq!(parameter[2], true);
    }

    #[test]
    fn test_extract_audio() {
        let body = concat!(
            ")]}'\n",
            "\n",
            "104\n",
            r#"[["wrb.fr","jQ1olc","[\"SUQz\"]",null,null,null,"generic"]]"#,
            "\n",
            r#"[["di",42],["af.httprm",41,"123",1]]"#,
            "\n",
        );
        assert_eq!(extract_audio(body).unwrap(), b"ID3");
    }

    #[test]
    fn test_extract_audio_missing() {
        let body = ")]}'\n\n[[\"wrb.fr\",\"jQ1olc\",null,null,null,[3],\"generic\"]]\n";
        assert!(matches!(extract_audio(body), Err(AppError::TtsError(_))));
    }

    #[test]
    fn test_extract_audio_bad_base64() {
        let body = r#"[["wrb.fr","jQ1olc","[\"@@@\"]",null,null,null,"generic"]]"#;
        assert!(extract_audio(body).is_err());
    }

    #[tokio::test]
    async fn test_save_rejects_unsupported_language() {
        let tts = GoogleTts::new("com", Duration::from_secs(1)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let request = SpeechRequest {
            text: "hello".into(),
            lang: "xx".into(),
            slow: false,
        };
        let result = tts.save(&request, &dir.path().join("out.mp3")).await;
        assert!(matches!(result, Err(AppError::UnsupportedLanguage(l)) if l == "xx"));
    }

    #[tokio::test]
    async fn test_save_rejects_empty_text() {
        let tts = GoogleTts::new("com", Duration::from_secs(1)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let request = SpeechRequest {
            text: "  ".into(),
            lang: "en".into(),
            slow: false,
        };
        let result = tts.save(&request, &dir.path().join("out.mp3")).await;
        assert!(matches!(result, Err(AppError::EmptyText)));
    }

    #[tokio::test]
    async fn test_save_joins_chunks_in_order() {
        let server = MockServer::start().await;

        // "ID3" and "abc"
        Mock::given(method("POST"))
            .and(path(BATCH_EXECUTE_PATH))
            .and(body_string_contains("f.req="))
            .and(body_string_contains("First"))
            .respond_with(audio_reply("SUQz"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(BATCH_EXECUTE_PATH))
            .and(body_string_contains("f.req="))
            .and(body_string_contains("Second"))
            .respond_with(audio_reply("YWJj"))
            .expect(1)
            .mount(&server)
            .await;

        let tts = GoogleTts::with_base_url(server.uri(), Duration::from_secs(5)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.mp3");

        tts.save(&request("First sentence. Second sentence.", "en"), &out).await.unwrap();

        assert_eq!(std::fs::read(&out).unwrap(), b"ID3abc");
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_save_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(BATCH_EXECUTE_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let tts = GoogleTts::with_base_url(server.uri(), Duration::from_secs(5)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let result = tts.save(&request("hello", "en"), &dir.path().join("out.mp3")).await;

        assert!(matches!(result, Err(AppError::TtsError(msg)) if msg.contains("500")));
    }

    #[tokio::test]
    async fn test_save_reply_without_audio() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(BATCH_EXECUTE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(")]}'\n\n[[\"di\",17]]\n"))
            .mount(&server)
            .await;

        let tts = GoogleTts::with_base_url(server.uri(), Duration::from_secs(5)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.mp3");
        let result = tts.save(&request("hello", "en"), &out).await;

        assert!(matches!(result, Err(AppError::TtsError(_))));
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn test_save_lowercases_language() {
        let server = MockServer::start().await;
        // The language sits JSON-escaped inside the form value: \"zh-cn\"
        Mock::given(method("POST"))
            .and(path(BATCH_EXECUTE_PATH))
            .and(body_string_contains("%5C%22zh-cn%5C%22"))
            .respond_with(audio_reply("SUQz"))
            .expect(1)
            .mount(&server)
            .await;

        let tts = GoogleTts::with_base_url(server.uri(), Duration::from_secs(5)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.mp3");

        tts.save(&request("ni hao", "zh-CN"), &out).await.unwrap();
        assert_eq!(std::fs::read(&out).unwrap(), b"ID3");
    }
}
