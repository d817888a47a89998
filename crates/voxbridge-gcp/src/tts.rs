use crate::auth::Credentials;
use crate::error::GcpError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use voxbridge_core::TtsConfig;

pub const TTS_ENDPOINT: &str = "https://texttospeech.googleapis.com";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SynthesizeRequest {
    pub input: SynthesisInput,
    pub voice: VoiceSelectionParams,
    pub audio_config: AudioConfig,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SynthesisInput {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VoiceSelectionParams {
    pub language_code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AudioConfig {
    pub audio_encoding: String,
    pub speaking_rate: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SynthesizeResponse {
    pub audio_content: String,
}

/// Wrapper around the Cloud Text-to-Speech v1 `text:synthesize` endpoint.
/// Holds the voice parameters it was constructed with; one call per
/// output file, no chunking of long text, no retry.
pub struct Synthesizer {
    http: reqwest::Client,
    credentials: Arc<Credentials>,
    language_code: String,
    voice_name: String,
    speaking_rate: f64,
}

impl Synthesizer {
    pub fn new(credentials: Arc<Credentials>, config: &TtsConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            language_code: config.language_code.clone(),
            voice_name: config.voice_name.clone(),
            speaking_rate: config.speaking_rate,
        }
    }

    fn build_request(&self, text: &str) -> SynthesizeRequest {
        SynthesizeRequest {
            input: SynthesisInput {
                text: text.to_string(),
            },
            voice: VoiceSelectionParams {
                language_code: self.language_code.clone(),
                name: self.voice_name.clone(),
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3".to_string(),
                speaking_rate: self.speaking_rate,
            },
        }
    }

    /// Synthesize `text` and write the MP3 bytes to `output_path`,
    /// overwriting any existing file. Returns the path on success.
    pub async fn synthesize(&self, text: &str, output_path: &Path) -> Result<PathBuf, GcpError> {
        let url = format!("{}/v1/text:synthesize", TTS_ENDPOINT);
        let request = self.build_request(text);

        let token = self.credentials.bearer_token().await?;
        let response = self
            .http
            .post(&url)
            .header("Authorization", token)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GcpError::UnexpectedResponse(format!(
                "synthesize returned {status}: {body}"
            )));
        }

        let body: SynthesizeResponse = response.json().await?;
        write_audio_content(&body.audio_content, output_path)
    }
}

/// Decode the base64 `audioContent` payload and write it to `path`.
pub(crate) fn write_audio_content(audio_b64: &str, path: &Path) -> Result<PathBuf, GcpError> {
    let audio = BASE64.decode(audio_b64)?;
    std::fs::write(path, &audio)?;
    println!("Audio content written to {}", path.display());
    tracing::info!(bytes = audio.len(), path = %path.display(), "synthesized audio written");
    Ok(path.to_path_buf())
}
