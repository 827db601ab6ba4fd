use std::sync::Arc;

use crate::application::ports::{
    EntityRecognizer, ModelLoadError, ModelProvider, SpeechSynthesizer, TextGenerator,
    TranscriptionEngine,
};
use crate::domain::ModelConfig;
use crate::infrastructure::audio::{CandleWhisperEngine, OpenAiWhisperEngine};
use crate::infrastructure::llm::{CandleQwenGenerator, OpenAiChatGenerator};
use crate::infrastructure::nlp::CandleNerRecognizer;
use crate::infrastructure::speech::{OnnxMmsSynthesizer, OpenAiSpeechSynthesizer};
use crate::presentation::config::{BackendSetting, OpenAiSettings, ProvidersSettings};

/// Builds each capability from the backend chosen for it in configuration.
/// Entity recognition always runs locally.
pub struct ConfiguredModelProvider {
    models: ModelConfig,
    providers: ProvidersSettings,
}

impl ConfiguredModelProvider {
    pub fn new(models: ModelConfig, providers: ProvidersSettings) -> Self {
        Self { models, providers }
    }

    fn openai_key(&self) -> Result<String, ModelLoadError> {
        self.providers
            .openai
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                ModelLoadError::InvalidConfig("OpenAI backend requires providers.openai.api_key".to_string())
            })
    }

    fn openai(&self) -> &OpenAiSettings {
        &self.providers.openai
    }
}

impl ModelProvider for ConfiguredModelProvider {
    fn load_speech_to_text(&self) -> Result<Arc<dyn TranscriptionEngine>, ModelLoadError> {
        match self.providers.speech_to_text {
            BackendSetting::Local => Ok(Arc::new(CandleWhisperEngine::load(&self.models)?)),
            BackendSetting::OpenAi => {
                tracing::info!("Using OpenAI transcription backend");
                let engine = OpenAiWhisperEngine::new(
                    self.openai_key()?,
                    self.openai().base_url.clone(),
                    self.openai().transcription_model.clone(),
                    self.openai().timeout(),
                )
                .map_err(|e| ModelLoadError::InvalidConfig(e.to_string()))?;
                Ok(Arc::new(engine))
            }
        }
    }

    fn load_entity_recognizer(&self) -> Result<Arc<dyn EntityRecognizer>, ModelLoadError> {
        Ok(Arc::new(CandleNerRecognizer::load(&self.models)?))
    }

    fn load_text_generator(&self) -> Result<Box<dyn TextGenerator>, ModelLoadError> {
        match self.providers.text_generator {
            BackendSetting::Local => Ok(Box::new(CandleQwenGenerator::load(&self.models)?)),
            BackendSetting::OpenAi => {
                tracing::info!("Using OpenAI chat completion backend");
                let generator = OpenAiChatGenerator::new(
                    self.openai_key()?,
                    self.openai().base_url.clone(),
                    self.openai().chat_model.clone(),
                    self.openai().timeout(),
                )
                .map_err(|e| ModelLoadError::InvalidConfig(e.to_string()))?;
                Ok(Box::new(generator))
            }
        }
    }

    fn load_speech_synthesizer(&self) -> Result<Box<dyn SpeechSynthesizer>, ModelLoadError> {
        match self.providers.speech_synthesizer {
            BackendSetting::Local => Ok(Box::new(OnnxMmsSynthesizer::load(&self.models)?)),
            BackendSetting::OpenAi => {
                tracing::info!("Using OpenAI speech backend");
                let synthesizer = OpenAiSpeechSynthesizer::new(
                    self.openai_key()?,
                    self.openai().base_url.clone(),
                    self.openai().speech_model.clone(),
                    self.openai().voice.clone(),
                    self.openai().timeout(),
                )
                .map_err(|e| ModelLoadError::InvalidConfig(e.to_string()))?;
                Ok(Box::new(synthesizer))
            }
        }
    }
}
