use std::sync::Arc;

use super::{EntityRecognizer, SpeechSynthesizer, TextGenerator, TranscriptionEngine};

/// Builds inference capabilities.
///
/// Every method may block for a long time (downloads, weight loading) and is
/// always called off the async runtime.
pub trait ModelProvider: Send + Sync {
    fn load_speech_to_text(&self) -> Result<Arc<dyn TranscriptionEngine>, ModelLoadError>;

    fn load_entity_recognizer(&self) -> Result<Arc<dyn EntityRecognizer>, ModelLoadError>;

    fn load_text_generator(&self) -> Result<Box<dyn TextGenerator>, ModelLoadError>;

    fn load_speech_synthesizer(&self) -> Result<Box<dyn SpeechSynthesizer>, ModelLoadError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("model download failed: {0}")]
    DownloadFailed(String),
    #[error("invalid model configuration: {0}")]
    InvalidConfig(String),
    #[error("weights could not be loaded: {0}")]
    WeightsFailed(String),
    #[error("tokenizer could not be loaded: {0}")]
    TokenizerFailed(String),
    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),
}
