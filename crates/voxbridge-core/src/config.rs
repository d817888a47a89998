use crate::error::ConfigError;
use std::path::PathBuf;

pub const CREDENTIALS_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const PROJECT_ID_VAR: &str = "GCP_PROJECT_ID";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the service-account JSON key file.
    pub credentials_path: PathBuf,
    /// GCP project the Translation API is billed against.
    pub project_id: String,
    pub log_level: String,
    pub capture: CaptureConfig,
    pub speech: SpeechConfig,
    pub translate: TranslateConfig,
    pub tts: TtsConfig,
}

#[derive(Debug, Clone)]
pub struct CaptureConfig {
    pub device_name: String,
    pub sample_rate: u32,
    /// Frames per capture buffer; one callback delivers this many samples.
    pub chunk_frames: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device_name: "default".to_string(),
            sample_rate: 16_000,
            chunk_frames: 1024,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpeechConfig {
    pub language_code: String,
    pub alternative_languages: Vec<String>,
    pub model: String,
    pub punctuation: bool,
    pub interim_results: bool,
    pub single_utterance: bool,
    /// Wall-clock bound on one whole streaming session, not per chunk.
    pub session_timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            language_code: "en-US".to_string(),
            alternative_languages: ["en-US", "es-ES", "fr-FR", "de-DE", "hi-IN", "ja-JP", "zh"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            model: "latest_long".to_string(),
            punctuation: true,
            interim_results: true,
            single_utterance: false,
            session_timeout_secs: 300,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranslateConfig {
    pub target_language: String,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            target_language: "en".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TtsConfig {
    pub language_code: String,
    pub voice_name: String,
    pub speaking_rate: f64,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            language_code: "en-IN".to_string(),
            voice_name: "en-IN-Wavenet-D".to_string(),
            speaking_rate: 1.0,
        }
    }
}

impl AppConfig {
    /// Build the configuration from process environment variables.
    ///
    /// Only the credential file path and project ID come from the
    /// environment; everything else has code defaults that callers
    /// override explicitly (CLI flags).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injected variable
    /// lookup, so tests never mutate process-wide state.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let credentials_path = get(CREDENTIALS_VAR)
            .ok_or_else(|| ConfigError::EnvVarNotFound(CREDENTIALS_VAR.to_string()))?;
        let project_id = get(PROJECT_ID_VAR)
            .ok_or_else(|| ConfigError::EnvVarNotFound(PROJECT_ID_VAR.to_string()))?;

        Ok(Self {
            credentials_path: PathBuf::from(credentials_path),
            project_id,
            log_level: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            capture: CaptureConfig::default(),
            speech: SpeechConfig::default(),
            translate: TranslateConfig::default(),
            tts: TtsConfig::default(),
        })
    }
}
