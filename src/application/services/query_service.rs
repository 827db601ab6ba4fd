use std::fmt::Display;
use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{AudioStore, LocationDirectory};
use crate::domain::{
    AudioFileName, DecodingOptions, QueryResult, QueryStage, StructuredReply, first_location,
};

use super::model_registry::{ModelRegistry, RegistryError};
use super::prompt_composer::PromptComposer;
use super::response_parser::{MalformedModelOutput, extract_structured_reply};
use super::wav_encoder::encode_wav;

pub const DEFAULT_MAX_NEW_TOKENS: usize = 256;
pub const DEFAULT_AUDIO_URL_PREFIX: &str = "/audio";

#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub decoding: DecodingOptions,
    pub max_new_tokens: usize,
    pub audio_url_prefix: String,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            decoding: DecodingOptions::default(),
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
            audio_url_prefix: DEFAULT_AUDIO_URL_PREFIX.to_string(),
        }
    }
}

/// Runs a spoken question through transcription, entity extraction, data
/// lookup, generation and synthesis.
pub struct QueryService {
    registry: Arc<ModelRegistry>,
    locations: Arc<dyn LocationDirectory>,
    audio_store: Arc<dyn AudioStore>,
    prompt_composer: PromptComposer,
    options: QueryOptions,
}

impl QueryService {
    pub fn new(
        registry: Arc<ModelRegistry>,
        locations: Arc<dyn LocationDirectory>,
        audio_store: Arc<dyn AudioStore>,
        options: QueryOptions,
    ) -> Self {
        Self {
            registry,
            locations,
            audio_store,
            prompt_composer: PromptComposer::new(),
            options,
        }
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    pub async fn process(&self, audio: Bytes) -> Result<QueryResult, QueryError> {
        let mut progress = StageTracker::new();

        let outcome = self.run(&mut progress, audio).await;

        match &outcome {
            Ok(result) => {
                progress.advance(QueryStage::Completed);
                tracing::info!(
                    audio_url = %result.assistant_response_audio_url,
                    suggested_actions = result.assistant_response.suggested_actions.len(),
                    "Voice query completed"
                );
            }
            Err(e) => progress.fail(e),
        }

        outcome
    }

    async fn run(
        &self,
        progress: &mut StageTracker,
        audio: Bytes,
    ) -> Result<QueryResult, QueryError> {
        if !self.registry.is_ready() {
            return Err(QueryError::ModelsNotReady);
        }

        let upload_name = AudioFileName::for_upload();
        let stored_bytes = self
            .audio_store
            .store(&upload_name, audio.clone())
            .await
            .map_err(internal(progress.current()))?;
        tracing::debug!(file = %upload_name, bytes = stored_bytes, "Uploaded audio persisted");

        progress.advance(QueryStage::Transcribing);
        let transcript = self.transcribe(&audio, progress.current()).await?;

        progress.advance(QueryStage::EntityExtracting);
        let entities = self
            .registry
            .entity_recognizer()
            .map_err(registry_error(progress.current()))?
            .recognize(&transcript)
            .await
            .map_err(internal(progress.current()))?;
        let location = first_location(&entities).map(str::to_string);
        tracing::debug!(entities = entities.len(), location = ?location, "Entities recognized");

        progress.advance(QueryStage::DataLookup);
        let record = self.locations.resolve(location.as_deref());
        tracing::debug!(safety_score = record.safety_score, "Accessibility record resolved");

        progress.advance(QueryStage::PromptComposing);
        let prompt = self
            .prompt_composer
            .compose(&transcript, location.as_deref(), &record);

        progress.advance(QueryStage::Generating);
        let generated = self.generate(&prompt, progress.current()).await?;

        progress.advance(QueryStage::ReplyParsing);
        let reply = extract_structured_reply(&generated).map_err(|e| {
            tracing::warn!(error = %e, chars = generated.len(), "Model reply could not be parsed");
            QueryError::MalformedModelOutput(e)
        })?;

        progress.advance(QueryStage::Synthesizing);
        let response_name = self.synthesize(&reply, progress.current()).await?;

        Ok(QueryResult {
            user_input: transcript,
            assistant_response: reply,
            assistant_response_audio_url: format!(
                "{}/{}",
                self.options.audio_url_prefix.trim_end_matches('/'),
                response_name
            ),
        })
    }

    async fn transcribe(&self, audio: &[u8], stage: QueryStage) -> Result<String, QueryError> {
        let transcript = self
            .registry
            .speech_to_text()
            .map_err(registry_error(stage))?
            .transcribe(audio, &self.options.decoding)
            .await
            .map_err(internal(stage))?;

        if transcript.trim().is_empty() {
            return Err(QueryError::NoSpeechDetected);
        }

        tracing::info!(chars = transcript.len(), "Audio transcribed");

        Ok(transcript)
    }

    async fn generate(&self, prompt: &str, stage: QueryStage) -> Result<String, QueryError> {
        let generator = self
            .registry
            .ensure_text_generator()
            .await
            .map_err(registry_error(stage))?;

        let generator = generator.lock().await;
        let generated = generator
            .generate(prompt, self.options.max_new_tokens)
            .await
            .map_err(internal(stage))?;

        tracing::debug!(chars = generated.len(), "Reply generated");
        Ok(generated)
    }

    async fn synthesize(
        &self,
        reply: &StructuredReply,
        stage: QueryStage,
    ) -> Result<AudioFileName, QueryError> {
        let synthesizer = self
            .registry
            .ensure_speech_synthesizer()
            .await
            .map_err(registry_error(stage))?;

        let speech = {
            let synthesizer = synthesizer.lock().await;
            synthesizer
                .synthesize(&reply.response_text)
                .await
                .map_err(internal(stage))?
        };

        let wav = encode_wav(&speech).map_err(internal(stage))?;

        let name = AudioFileName::for_response();
        self.audio_store
            .store(&name, Bytes::from(wav))
            .await
            .map_err(internal(stage))?;

        tracing::debug!(
            file = %name,
            sample_rate = speech.sample_rate,
            duration_secs = speech.duration_secs(),
            "Reply audio written"
        );

        Ok(name)
    }
}

struct StageTracker {
    current: QueryStage,
}

impl StageTracker {
    fn new() -> Self {
        Self {
            current: QueryStage::Received,
        }
    }

    fn current(&self) -> QueryStage {
        self.current
    }

    fn advance(&mut self, to: QueryStage) {
        debug_assert_eq!(self.current.next(), Some(to));
        tracing::debug!(from = %self.current, to = %to, "Query stage transition");
        self.current = to;
    }

    fn fail(&mut self, error: &QueryError) {
        tracing::warn!(stage = %self.current, error = %error, "Voice query failed");
        self.current = QueryStage::Failed;
    }
}

fn internal<E: Display>(stage: QueryStage) -> impl FnOnce(E) -> QueryError {
    move |e| QueryError::Internal {
        stage,
        message: e.to_string(),
    }
}

fn registry_error(stage: QueryStage) -> impl FnOnce(RegistryError) -> QueryError {
    move |e| match e {
        RegistryError::NotReady => QueryError::ModelsNotReady,
        other => QueryError::Internal {
            stage,
            message: other.to_string(),
        },
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("models are not loaded yet")]
    ModelsNotReady,
    #[error("no speech detected")]
    NoSpeechDetected,
    #[error("model output could not be parsed: {0}")]
    MalformedModelOutput(MalformedModelOutput),
    #[error("{stage} failed: {message}")]
    Internal { stage: QueryStage, message: String },
}
