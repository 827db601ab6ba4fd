use async_trait::async_trait;

use crate::domain::SynthesizedSpeech;

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<SynthesizedSpeech, SpeechSynthesisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechSynthesisError {
    #[error("nothing to synthesize")]
    EmptyInput,
    #[error("inference failed: {0}")]
    InferenceFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
}
