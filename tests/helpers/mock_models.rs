use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use safepath::application::ports::{
    EntityRecognitionError, EntityRecognizer, ModelLoadError, ModelProvider, SpeechSynthesisError,
    SpeechSynthesizer, TextGenerationError, TextGenerator, TranscriptionEngine,
    TranscriptionError,
};
use safepath::domain::{DecodingOptions, RecognizedEntity, SynthesizedSpeech};

pub const VALID_REPLY: &str = r#"Tabii. {"thought":"Kullanıcı tuvalet arıyor.","responseText":"Beşiktaş Belediyesi binasında rampalı bir tuvalet var.","suggestedActions":["Yol tarifi al","Kafeleri göster"]}"#;

pub struct StubTranscriber {
    pub transcript: String,
}

#[async_trait]
impl TranscriptionEngine for StubTranscriber {
    async fn transcribe(
        &self,
        _audio_data: &[u8],
        _options: &DecodingOptions,
    ) -> Result<String, TranscriptionError> {
        Ok(self.transcript.clone())
    }
}

pub struct StubRecognizer {
    pub entities: Vec<RecognizedEntity>,
}

#[async_trait]
impl EntityRecognizer for StubRecognizer {
    async fn recognize(&self, _text: &str) -> Result<Vec<RecognizedEntity>, EntityRecognitionError> {
        Ok(self.entities.clone())
    }
}

pub struct StubGenerator {
    pub reply: String,
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _max_new_tokens: usize,
    ) -> Result<String, TextGenerationError> {
        Ok(self.reply.clone())
    }
}

/// Returns each scripted reply in turn, repeating the last one.
pub struct ScriptedGenerator {
    pub replies: Vec<String>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _max_new_tokens: usize,
    ) -> Result<String, TextGenerationError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let index = call.min(self.replies.len().saturating_sub(1));
        self.replies
            .get(index)
            .cloned()
            .ok_or_else(|| TextGenerationError::InvalidResponse("no replies".to_string()))
    }
}

pub struct StubSynthesizer;

#[async_trait]
impl SpeechSynthesizer for StubSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<SynthesizedSpeech, SpeechSynthesisError> {
        if text.trim().is_empty() {
            return Err(SpeechSynthesisError::EmptyInput);
        }
        Ok(SynthesizedSpeech::new(vec![0.25; 1600], 16_000))
    }
}

pub fn location_entity(word: &str) -> RecognizedEntity {
    RecognizedEntity {
        word: word.to_string(),
        label: "LOC".to_string(),
        score: 0.98,
        start: 0,
        end: word.len(),
    }
}

/// Provider handing out stubs and counting how often each capability is built.
pub struct StubModelProvider {
    pub transcript: String,
    pub entities: Vec<RecognizedEntity>,
    pub replies: Vec<String>,
    pub load_delay: Duration,
    pub failing_generator_loads: AtomicUsize,
    pub speech_to_text_loads: AtomicUsize,
    pub entity_recognizer_loads: AtomicUsize,
    pub text_generator_loads: AtomicUsize,
    pub speech_synthesizer_loads: AtomicUsize,
}

impl StubModelProvider {
    pub fn new(transcript: &str, reply: &str) -> Self {
        Self {
            transcript: transcript.to_string(),
            entities: vec![location_entity("Beşiktaş")],
            replies: vec![reply.to_string()],
            load_delay: Duration::ZERO,
            failing_generator_loads: AtomicUsize::new(0),
            speech_to_text_loads: AtomicUsize::new(0),
            entity_recognizer_loads: AtomicUsize::new(0),
            text_generator_loads: AtomicUsize::new(0),
            speech_synthesizer_loads: AtomicUsize::new(0),
        }
    }

    pub fn with_entities(mut self, entities: Vec<RecognizedEntity>) -> Self {
        self.entities = entities;
        self
    }

    pub fn with_replies(mut self, replies: &[&str]) -> Self {
        self.replies = replies.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    pub fn failing_generator_loads(self, times: usize) -> Self {
        self.failing_generator_loads.store(times, Ordering::SeqCst);
        self
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

impl ModelProvider for StubModelProvider {
    fn load_speech_to_text(&self) -> Result<Arc<dyn TranscriptionEngine>, ModelLoadError> {
        self.speech_to_text_loads.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(StubTranscriber {
            transcript: self.transcript.clone(),
        }))
    }

    fn load_entity_recognizer(&self) -> Result<Arc<dyn EntityRecognizer>, ModelLoadError> {
        self.entity_recognizer_loads.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(StubRecognizer {
            entities: self.entities.clone(),
        }))
    }

    fn load_text_generator(&self) -> Result<Box<dyn TextGenerator>, ModelLoadError> {
        self.text_generator_loads.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.load_delay);

        let remaining_failures = self.failing_generator_loads.load(Ordering::SeqCst);
        if remaining_failures > 0 {
            self.failing_generator_loads
                .store(remaining_failures - 1, Ordering::SeqCst);
            return Err(ModelLoadError::WeightsFailed("simulated failure".to_string()));
        }

        Ok(Box::new(ScriptedGenerator {
            replies: self.replies.clone(),
            calls: AtomicUsize::new(0),
        }))
    }

    fn load_speech_synthesizer(&self) -> Result<Box<dyn SpeechSynthesizer>, ModelLoadError> {
        self.speech_synthesizer_loads.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.load_delay);
        Ok(Box::new(StubSynthesizer))
    }
}
