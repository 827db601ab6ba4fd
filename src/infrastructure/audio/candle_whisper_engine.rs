use std::sync::Arc;

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use tokenizers::Tokenizer;
use tokio::sync::Mutex;

use crate::application::ports::{ModelLoadError, TranscriptionEngine, TranscriptionError};
use crate::domain::{DecodingOptions, ModelConfig};
use crate::infrastructure::inference::{hub, select_device, select_dtype};

use super::audio_decoder::decode_for_whisper;
use super::mel_filters::mel_filter_bank;

const MAX_DECODE_TOKENS: usize = 224;

pub struct CandleWhisperEngine {
    inner: Arc<WhisperInner>,
}

struct WhisperInner {
    model: Mutex<m::model::Whisper>,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    dtype: DType,
    mel_filters: Vec<f32>,
}

impl CandleWhisperEngine {
    /// Weight precision for the configured device: half precision on
    /// accelerators unless configured otherwise, full precision on the CPU.
    pub fn weights_dtype(config: &ModelConfig, device: &Device) -> DType {
        select_dtype(config.precision, device)
    }

    pub fn load(config: &ModelConfig) -> Result<Self, ModelLoadError> {
        let device = select_device(config.device)?;
        let dtype = Self::weights_dtype(config, &device);
        let model_id = config.speech_to_text_model.as_str();

        tracing::info!(
            device = ?device,
            dtype = ?dtype,
            model = model_id,
            "Initializing Candle Whisper transcription engine"
        );

        let repo = hub::open_repo(&config.cache_dir, model_id)?;
        let config_path = hub::fetch(&repo, "config.json")?;
        let tokenizer_path = hub::fetch(&repo, "tokenizer.json")?;
        let weights_path = hub::fetch(&repo, "model.safetensors")?;

        let whisper_config: Config = hub::read_json(&config_path)?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| ModelLoadError::TokenizerFailed(e.to_string()))?;

        let mel_filters =
            mel_filter_bank(whisper_config.num_mel_bins, m::N_FFT, m::SAMPLE_RATE as u32);

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], dtype, &device)
                .map_err(|e| ModelLoadError::WeightsFailed(e.to_string()))?
        };

        let model = m::model::Whisper::load(&vb, whisper_config.clone())
            .map_err(|e| ModelLoadError::WeightsFailed(format!("model: {}", e)))?;

        tracing::info!("Candle Whisper engine loaded successfully");

        Ok(Self {
            inner: Arc::new(WhisperInner {
                model: Mutex::new(model),
                tokenizer,
                config: whisper_config,
                device,
                dtype,
                mel_filters,
            }),
        })
    }
}

#[async_trait]
impl TranscriptionEngine for CandleWhisperEngine {
    async fn transcribe(
        &self,
        audio_data: &[u8],
        options: &DecodingOptions,
    ) -> Result<String, TranscriptionError> {
        let pcm = decode_for_whisper(audio_data)
            .map_err(|e| TranscriptionError::DecodingFailed(e.to_string()))?;

        let inner = Arc::clone(&self.inner);
        let options = options.clone();

        tokio::task::spawn_blocking(move || inner.transcribe_pcm(&pcm, &options))
            .await
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("task join: {}", e)))?
    }
}

impl WhisperInner {
    fn transcribe_pcm(
        &self,
        pcm: &[f32],
        options: &DecodingOptions,
    ) -> Result<String, TranscriptionError> {
        let prompt = self.prompt_tokens(options)?;
        let eot_token = token_id(&self.tokenizer, m::EOT_TOKEN)?;

        let mut model = self.model.blocking_lock();
        let mut segments: Vec<String> = Vec::new();

        for (i, chunk) in pcm.chunks(m::N_SAMPLES).enumerate() {
            let mut samples = chunk.to_vec();
            samples.resize(m::N_SAMPLES, 0.0);

            let mel_data = m::audio::pcm_to_mel(&self.config, &samples, &self.mel_filters);
            let n_mel = self.config.num_mel_bins;
            let n_frames = mel_data.len() / n_mel;
            let mel = Tensor::from_vec(mel_data, (1, n_mel, n_frames), &self.device)
                .and_then(|t| t.to_dtype(self.dtype))
                .map_err(|e| TranscriptionError::TranscriptionFailed(format!("mel tensor: {}", e)))?;

            tracing::debug!(segment = i, "Transcribing audio segment");
            let text = self.decode_segment(&mut model, &mel, &prompt, eot_token)?;
            if !text.is_empty() {
                segments.push(text);
            }
        }

        let transcript = segments.join(" ");

        tracing::info!(
            segments = segments.len(),
            chars = transcript.len(),
            language = options.language_code(),
            "Audio transcription completed"
        );

        Ok(transcript)
    }

    /// Start-of-transcript, forced language, transcribe task and, unless
    /// timestamps were requested, the no-timestamps marker.
    fn prompt_tokens(&self, options: &DecodingOptions) -> Result<Vec<u32>, TranscriptionError> {
        let language = format!("<|{}|>", options.language_code());
        let language_token = self
            .tokenizer
            .token_to_id(&language)
            .ok_or_else(|| TranscriptionError::UnsupportedLanguage(options.language.clone()))?;

        let mut tokens = vec![
            token_id(&self.tokenizer, m::SOT_TOKEN)?,
            language_token,
            token_id(&self.tokenizer, m::TRANSCRIBE_TOKEN)?,
        ];
        if !options.timestamps {
            tokens.push(token_id(&self.tokenizer, m::NO_TIMESTAMPS_TOKEN)?);
        }
        Ok(tokens)
    }

    fn decode_segment(
        &self,
        model: &mut m::model::Whisper,
        mel: &Tensor,
        prompt: &[u32],
        eot_token: u32,
    ) -> Result<String, TranscriptionError> {
        let failed = |e: candle_core::Error| TranscriptionError::TranscriptionFailed(e.to_string());

        let audio_features = model.encoder.forward(mel, true).map_err(failed)?;

        let mut tokens = prompt.to_vec();
        let mut generated: Vec<u32> = Vec::new();

        for _ in 0..MAX_DECODE_TOKENS {
            let token_tensor = Tensor::new(tokens.as_slice(), &self.device)
                .and_then(|t| t.unsqueeze(0))
                .map_err(failed)?;

            let decoder_output = model
                .decoder
                .forward(&token_tensor, &audio_features, tokens.len() == prompt.len())
                .map_err(failed)?;

            let logits = decoder_output
                .squeeze(0)
                .and_then(|t| model.decoder.final_linear(&t))
                .map_err(failed)?;

            let seq_len = logits.dim(0).map_err(failed)?;
            let next_token = logits
                .get(seq_len - 1)
                .and_then(|t| t.argmax(0))
                .and_then(|t| t.to_scalar::<u32>())
                .map_err(failed)?;

            if next_token == eot_token {
                break;
            }

            tokens.push(next_token);
            generated.push(next_token);
        }

        model.reset_kv_cache();

        let text = self
            .tokenizer
            .decode(&generated, true)
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("decode: {}", e)))?;

        Ok(text.trim().to_string())
    }
}

fn token_id(tokenizer: &Tokenizer, token: &str) -> Result<u32, TranscriptionError> {
    tokenizer.token_to_id(token).ok_or_else(|| {
        TranscriptionError::TranscriptionFailed(format!("token not found: {}", token))
    })
}
