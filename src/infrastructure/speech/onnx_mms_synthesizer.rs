use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ort::session::{Session, SessionInputValue, SessionInputs};
use ort::value::Tensor;
use serde::Deserialize;

use crate::application::ports::{ModelLoadError, SpeechSynthesisError, SpeechSynthesizer};
use crate::domain::{ModelConfig, SynthesizedSpeech};
use crate::infrastructure::inference::hub;

use super::character_vocabulary::CharacterVocabulary;

const DEFAULT_SAMPLING_RATE: u32 = 16_000;

/// VITS/MMS text-to-speech exported to ONNX.
pub struct OnnxMmsSynthesizer {
    inner: Arc<MmsInner>,
}

struct MmsInner {
    session: Mutex<Session>,
    vocabulary: CharacterVocabulary,
    sample_rate: u32,
}

#[derive(Deserialize)]
struct VitsConfig {
    #[serde(default = "default_sampling_rate")]
    sampling_rate: u32,
}

#[derive(Deserialize)]
struct VitsTokenizerConfig {
    #[serde(default = "default_pad_token")]
    pad_token: String,
    #[serde(default = "default_add_blank")]
    add_blank: bool,
    #[serde(default = "default_add_blank")]
    normalize: bool,
}

fn default_sampling_rate() -> u32 {
    DEFAULT_SAMPLING_RATE
}

fn default_pad_token() -> String {
    "<pad>".to_string()
}

fn default_add_blank() -> bool {
    true
}

impl OnnxMmsSynthesizer {
    pub fn load(config: &ModelConfig) -> Result<Self, ModelLoadError> {
        let model_id = config.speech_synthesizer_model.as_str();
        let onnx_repo_id = config
            .speech_synthesizer_onnx_repo
            .as_deref()
            .unwrap_or(model_id);

        tracing::info!(
            model = model_id,
            onnx_repo = onnx_repo_id,
            onnx_file = %config.speech_synthesizer_onnx_file,
            "Initializing ONNX speech synthesizer"
        );

        let repo = hub::open_repo(&config.cache_dir, model_id)?;
        let vits_config: VitsConfig = hub::read_json(&hub::fetch(&repo, "config.json")?)?;
        let tokenizer_config: VitsTokenizerConfig =
            hub::read_json(&hub::fetch(&repo, "tokenizer_config.json")?)?;
        let vocab: HashMap<String, i64> = hub::read_json(&hub::fetch(&repo, "vocab.json")?)?;

        let vocabulary = CharacterVocabulary::new(
            vocab,
            &tokenizer_config.pad_token,
            tokenizer_config.add_blank,
            tokenizer_config.normalize,
        );

        let onnx_repo = hub::open_repo(&config.cache_dir, onnx_repo_id)?;
        let onnx_path = hub::fetch(&onnx_repo, &config.speech_synthesizer_onnx_file)?;

        let session = Session::builder()
            .and_then(|mut b| b.commit_from_file(&onnx_path))
            .map_err(|e| ModelLoadError::WeightsFailed(format!("onnx session: {}", e)))?;

        tracing::info!(
            sample_rate = vits_config.sampling_rate,
            "ONNX speech synthesizer loaded successfully"
        );

        Ok(Self {
            inner: Arc::new(MmsInner {
                session: Mutex::new(session),
                vocabulary,
                sample_rate: vits_config.sampling_rate,
            }),
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for OnnxMmsSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<SynthesizedSpeech, SpeechSynthesisError> {
        let token_ids = self.inner.vocabulary.encode(text);
        if token_ids.is_empty() {
            return Err(SpeechSynthesisError::EmptyInput);
        }

        let inner = Arc::clone(&self.inner);

        tokio::task::spawn_blocking(move || inner.run(token_ids))
            .await
            .map_err(|e| SpeechSynthesisError::InferenceFailed(format!("task join: {}", e)))?
    }
}

impl MmsInner {
    fn run(&self, token_ids: Vec<i64>) -> Result<SynthesizedSpeech, SpeechSynthesisError> {
        let failed = |e: ort::Error| SpeechSynthesisError::InferenceFailed(e.to_string());

        let seq_len = token_ids.len();
        let input_ids = Tensor::from_array(([1_usize, seq_len], token_ids)).map_err(failed)?;

        let mut feed: HashMap<String, SessionInputValue> = HashMap::new();
        feed.insert("input_ids".to_string(), input_ids.into());

        let mut session = self.session.lock().map_err(|_| {
            SpeechSynthesisError::InferenceFailed("session lock poisoned".to_string())
        })?;

        let outputs = session.run(SessionInputs::from(feed)).map_err(failed)?;
        let (_shape, waveform) = outputs[0_usize]
            .try_extract_tensor::<f32>()
            .map_err(failed)?;

        let speech = SynthesizedSpeech::new(waveform.to_vec(), self.sample_rate);

        tracing::debug!(
            tokens = seq_len,
            duration_secs = speech.duration_secs(),
            "Speech synthesized"
        );

        Ok(speech)
    }
}
