use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, multipart};
use serde::Deserialize;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::DecodingOptions;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_TRANSCRIPTION_MODEL: &str = "whisper-1";
pub const DEFAULT_OPENAI_TIMEOUT: Duration = Duration::from_secs(120);

/// Speech to text delegated to an OpenAI-compatible `/audio/transcriptions`
/// endpoint. The uploaded bytes are forwarded untouched; the remote side
/// handles decoding and resampling.
pub struct OpenAiWhisperEngine {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
}

impl OpenAiWhisperEngine {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
        timeout: Duration,
    ) -> Result<Self, TranscriptionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("http client: {}", e)))?;
        let base_url = base_url.unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());
        Ok(Self {
            client,
            api_key,
            endpoint: format!("{}/audio/transcriptions", base_url.trim_end_matches('/')),
            model: model.unwrap_or_else(|| DEFAULT_OPENAI_TRANSCRIPTION_MODEL.to_string()),
        })
    }

    fn build_form(
        &self,
        audio_data: &[u8],
        options: &DecodingOptions,
    ) -> Result<multipart::Form, TranscriptionError> {
        let audio = multipart::Part::bytes(audio_data.to_vec())
            .file_name("query.wav")
            .mime_str("audio/wav")
            .map_err(|e| TranscriptionError::ApiRequestFailed(e.to_string()))?;

        Ok(multipart::Form::new()
            .text("model", self.model.clone())
            .text("language", options.language_code().to_string())
            .text("temperature", "0")
            .text("response_format", "json")
            .part("file", audio))
    }
}

#[async_trait]
impl TranscriptionEngine for OpenAiWhisperEngine {
    async fn transcribe(
        &self,
        audio_data: &[u8],
        options: &DecodingOptions,
    ) -> Result<String, TranscriptionError> {
        let form = self.build_form(audio_data, options)?;

        tracing::debug!(
            model = %self.model,
            language = options.language_code(),
            bytes = audio_data.len(),
            "Requesting remote transcription"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("invalid body: {}", e)))?;

        Ok(parsed.text.trim().to_string())
    }
}
