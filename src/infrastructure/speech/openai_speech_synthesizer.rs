use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::application::ports::{SpeechSynthesisError, SpeechSynthesizer};
use crate::domain::SynthesizedSpeech;
use crate::infrastructure::audio::{DEFAULT_OPENAI_BASE_URL, decode_audio};

pub const DEFAULT_OPENAI_SPEECH_MODEL: &str = "tts-1";
pub const DEFAULT_OPENAI_VOICE: &str = "alloy";

/// Speech through an OpenAI-compatible `/audio/speech` API, requested as WAV.
pub struct OpenAiSpeechSynthesizer {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    voice: String,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
}

impl OpenAiSpeechSynthesizer {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
        voice: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SpeechSynthesisError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SpeechSynthesisError::ApiRequestFailed(format!("http client: {}", e)))?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_OPENAI_SPEECH_MODEL.to_string()),
            voice: voice.unwrap_or_else(|| DEFAULT_OPENAI_VOICE.to_string()),
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiSpeechSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<SynthesizedSpeech, SpeechSynthesisError> {
        if text.trim().is_empty() {
            return Err(SpeechSynthesisError::EmptyInput);
        }

        let url = format!("{}/audio/speech", self.base_url.trim_end_matches('/'));
        let request_body = SpeechRequest {
            model: &self.model,
            input: text,
            voice: &self.voice,
            response_format: "wav",
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| SpeechSynthesisError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechSynthesisError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SpeechSynthesisError::ApiRequestFailed(format!("body: {}", e)))?;

        let decoded =
            decode_audio(&audio).map_err(|e| SpeechSynthesisError::DecodingFailed(e.to_string()))?;

        tracing::debug!(
            model = %self.model,
            sample_rate = decoded.sample_rate,
            "Remote speech synthesis completed"
        );

        Ok(SynthesizedSpeech::new(decoded.samples, decoded.sample_rate))
    }
}
