use crate::auth::Credentials;
use crate::error::GcpError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const TRANSLATE_ENDPOINT: &str = "https://translation.googleapis.com";

/// Seam between the recognition loop and the translation backend, so the
/// loop is testable with a stub.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target_language`, returning the translated
    /// string. No caching, no batching.
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, GcpError>;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TranslateTextRequest {
    pub contents: Vec<String>,
    pub target_language_code: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TranslateTextResponse {
    #[serde(default)]
    pub translations: Vec<Translation>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Translation {
    pub translated_text: String,
    #[serde(default)]
    pub detected_language_code: Option<String>,
}

/// Client for the Cloud Translation v3 `translateText` endpoint.
pub struct TranslateClient {
    http: reqwest::Client,
    credentials: Arc<Credentials>,
    project_id: String,
}

impl TranslateClient {
    pub fn new(credentials: Arc<Credentials>, project_id: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            project_id: project_id.into(),
        }
    }
}

#[async_trait]
impl Translator for TranslateClient {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, GcpError> {
        let url = format!(
            "{}/v3/projects/{}/locations/global:translateText",
            TRANSLATE_ENDPOINT, self.project_id
        );
        let request = TranslateTextRequest {
            contents: vec![text.to_string()],
            target_language_code: target_language.to_string(),
            mime_type: "text/plain".to_string(),
        };

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
                "translate returned {status}: {body}"
            )));
        }

        let body: TranslateTextResponse = response.json().await?;
        let translation = body.translations.into_iter().next().ok_or_else(|| {
            GcpError::UnexpectedResponse("empty translations list".to_string())
        })?;

        if let Some(detected) = &translation.detected_language_code {
            tracing::debug!(detected, "translation source language");
        }
        Ok(translation.translated_text)
    }
}
