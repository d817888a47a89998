pub mod config;
pub mod error;
pub mod types;

pub use config::{
    AppConfig, CaptureConfig, SpeechConfig, TranslateConfig, TtsConfig, CREDENTIALS_VAR,
    PROJECT_ID_VAR,
};
pub use error::{AudioError, ConfigError};
pub use types::Utterance;
