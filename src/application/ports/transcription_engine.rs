use async_trait::async_trait;

use crate::domain::DecodingOptions;

/// Speech to text over a complete uploaded recording.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Returns the transcript with surrounding whitespace removed. An empty
    /// string means no speech was recognized.
    async fn transcribe(
        &self,
        audio_data: &[u8],
        options: &DecodingOptions,
    ) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
