use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Which page set the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteVariant {
    /// Menu at `/` plus the ABC, listening and writing games.
    Games,
    /// A single index page at `/`.
    VoiceTesting,
}

impl FromStr for SiteVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "games" | "abc" => Ok(SiteVariant::Games),
            "voice-testing" | "voice_testing" => Ok(SiteVariant::VoiceTesting),
            other => Err(ConfigError::UnknownSite(other.to_string())),
        }
    }
}

impl std::fmt::Display for SiteVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SiteVariant::Games => write!(f, "games"),
            SiteVariant::VoiceTesting => write!(f, "voice-testing"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub site: SiteVariant,
    pub templates_dir: PathBuf,
    pub static_dir: PathBuf,
    pub tts_tld: String,
    pub tts_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_var(&lookup, "PORT", 5000)?;
        let site = match lookup("SITE") {
            Some(value) => value.parse()?,
            None => SiteVariant::Games,
        };
        let templates_dir = lookup("TEMPLATES_DIR").unwrap_or_else(|| "templates".to_string());
        let static_dir = lookup("STATIC_DIR").unwrap_or_else(|| "static".to_string());
        let tts_tld = lookup("TTS_TLD").unwrap_or_else(|| "com".to_string());
        let timeout_secs: u64 = parse_var(&lookup, "TTS_TIMEOUT_SECS", 30)?;

        Ok(Self {
            host,
            port,
            site,
            templates_dir: templates_dir.into(),
            static_dir: static_dir.into(),
            tts_tld,
            tts_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}
