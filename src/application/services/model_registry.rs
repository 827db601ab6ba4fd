use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{Mutex, OnceCell};

use crate::application::ports::{
    EntityRecognizer, ModelLoadError, ModelProvider, SpeechSynthesizer, TextGenerator,
    TranscriptionEngine,
};
use crate::domain::ModelConfig;

/// Holds the four inference capabilities for the lifetime of the process.
///
/// Speech-to-text and entity recognition are loaded by [`initialize_core`]
/// before the server accepts traffic. Text generation and speech synthesis
/// are loaded on first demand. Each slot goes from empty to loaded at most
/// once and never back; concurrent first callers wait on the same load.
///
/// The generator and synthesizer are handed out behind a [`Mutex`] so that
/// only one request runs inference on each at a time.
///
/// [`initialize_core`]: ModelRegistry::initialize_core
pub struct ModelRegistry {
    config: ModelConfig,
    provider: Arc<dyn ModelProvider>,
    speech_to_text: OnceCell<Arc<dyn TranscriptionEngine>>,
    entity_recognizer: OnceCell<Arc<dyn EntityRecognizer>>,
    text_generator: OnceCell<Mutex<Box<dyn TextGenerator>>>,
    speech_synthesizer: OnceCell<Mutex<Box<dyn SpeechSynthesizer>>>,
}

impl ModelRegistry {
    pub fn new(config: ModelConfig, provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            config,
            provider,
            speech_to_text: OnceCell::new(),
            entity_recognizer: OnceCell::new(),
            text_generator: OnceCell::new(),
            speech_synthesizer: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Eagerly loads speech-to-text and entity recognition. A second call
    /// is a no-op.
    pub async fn initialize_core(&self) -> Result<(), RegistryError> {
        tracing::info!(
            device = %self.config.device,
            cache_dir = %self.config.cache_dir.display(),
            "Initializing core models"
        );

        self.speech_to_text
            .get_or_try_init(|| {
                self.load(Capability::SpeechToText, |p| p.load_speech_to_text())
            })
            .await?;

        self.entity_recognizer
            .get_or_try_init(|| {
                self.load(Capability::EntityRecognizer, |p| {
                    p.load_entity_recognizer()
                })
            })
            .await?;

        tracing::info!("Core models ready; text generation and speech synthesis load on demand");
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.speech_to_text.initialized() && self.entity_recognizer.initialized()
    }

    pub fn speech_to_text(&self) -> Result<Arc<dyn TranscriptionEngine>, RegistryError> {
        self.speech_to_text
            .get()
            .cloned()
            .ok_or(RegistryError::NotReady)
    }

    pub fn entity_recognizer(&self) -> Result<Arc<dyn EntityRecognizer>, RegistryError> {
        self.entity_recognizer
            .get()
            .cloned()
            .ok_or(RegistryError::NotReady)
    }

    pub fn text_generator_loaded(&self) -> bool {
        self.text_generator.initialized()
    }

    pub fn speech_synthesizer_loaded(&self) -> bool {
        self.speech_synthesizer.initialized()
    }

    /// Returns the text generator, loading it if this is the first demand.
    ///
    /// A failed load leaves the slot empty; the next caller tries again.
    pub async fn ensure_text_generator(
        &self,
    ) -> Result<&Mutex<Box<dyn TextGenerator>>, RegistryError> {
        self.text_generator
            .get_or_try_init(|| async {
                self.load(Capability::TextGenerator, |p| p.load_text_generator())
                    .await
                    .map(Mutex::new)
            })
            .await
    }

    /// Returns the speech synthesizer, loading it if this is the first demand.
    pub async fn ensure_speech_synthesizer(
        &self,
    ) -> Result<&Mutex<Box<dyn SpeechSynthesizer>>, RegistryError> {
        self.speech_synthesizer
            .get_or_try_init(|| async {
                self.load(Capability::SpeechSynthesizer, |p| {
                    p.load_speech_synthesizer()
                })
                .await
                .map(Mutex::new)
            })
            .await
    }

    async fn load<T, F>(&self, capability: Capability, load: F) -> Result<T, RegistryError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn ModelProvider) -> Result<T, ModelLoadError> + Send + 'static,
    {
        let provider = Arc::clone(&self.provider);
        let model = capability.model_id(&self.config).to_string();
        let started = Instant::now();

        tracing::info!(capability = %capability, model = %model, "Loading model");

        let loaded = tokio::task::spawn_blocking(move || load(provider.as_ref()))
            .await
            .map_err(|e| RegistryError::LoaderAborted {
                capability,
                message: e.to_string(),
            })?
            .map_err(|source| {
                tracing::error!(capability = %capability, model = %model, error = %source, "Model load failed");
                RegistryError::LoadFailed { capability, source }
            })?;

        tracing::info!(
            capability = %capability,
            model = %model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Model loaded"
        );

        Ok(loaded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    SpeechToText,
    EntityRecognizer,
    TextGenerator,
    SpeechSynthesizer,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::SpeechToText => "speech_to_text",
            Capability::EntityRecognizer => "entity_recognizer",
            Capability::TextGenerator => "text_generator",
            Capability::SpeechSynthesizer => "speech_synthesizer",
        }
    }

    fn model_id<'a>(&self, config: &'a ModelConfig) -> &'a str {
        match self {
            Capability::SpeechToText => &config.speech_to_text_model,
            Capability::EntityRecognizer => &config.entity_recognizer_model,
            Capability::TextGenerator => &config.text_generator_model,
            Capability::SpeechSynthesizer => &config.speech_synthesizer_model,
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("core models are not initialized")]
    NotReady,
    #[error("loading {capability} failed: {source}")]
    LoadFailed {
        capability: Capability,
        #[source]
        source: ModelLoadError,
    },
    #[error("loader for {capability} did not complete: {message}")]
    LoaderAborted {
        capability: Capability,
        message: String,
    },
}
