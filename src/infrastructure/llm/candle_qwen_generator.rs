use std::sync::Arc;

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::qwen2::{Config, ModelForCausalLM};
use tokenizers::Tokenizer;
use tokio::sync::Mutex;

use crate::application::ports::{ModelLoadError, TextGenerationError, TextGenerator};
use crate::domain::ModelConfig;
use crate::infrastructure::inference::{hub, select_device, select_dtype};

/// Tokens that end an assistant turn.
const STOP_TOKENS: [&str; 2] = ["<|im_end|>", "<|endoftext|>"];

/// Qwen2-family causal language model run with Candle.
pub struct CandleQwenGenerator {
    inner: Arc<QwenInner>,
}

struct QwenInner {
    model: Mutex<ModelForCausalLM>,
    tokenizer: Tokenizer,
    stop_tokens: Vec<u32>,
    device: Device,
}

impl CandleQwenGenerator {
    pub fn load(config: &ModelConfig) -> Result<Self, ModelLoadError> {
        let device = select_device(config.device)?;
        let dtype = select_dtype(config.precision, &device);
        let model_id = config.text_generator_model.as_str();

        tracing::info!(
            device = ?device,
            dtype = ?dtype,
            model = model_id,
            "Initializing Candle text generator"
        );

        let repo = hub::open_repo(&config.cache_dir, model_id)?;
        let config_path = hub::fetch(&repo, "config.json")?;
        let tokenizer_path = hub::fetch(&repo, "tokenizer.json")?;
        let weight_paths = hub::safetensors_paths(&repo)?;

        let qwen_config: Config = hub::read_json(&config_path)?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| ModelLoadError::TokenizerFailed(e.to_string()))?;

        let stop_tokens: Vec<u32> = STOP_TOKENS
            .iter()
            .filter_map(|token| tokenizer.token_to_id(token))
            .collect();
        if stop_tokens.is_empty() {
            return Err(ModelLoadError::TokenizerFailed(
                "tokenizer defines no end-of-turn token".to_string(),
            ));
        }

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&weight_paths, dtype, &device)
                .map_err(|e| ModelLoadError::WeightsFailed(e.to_string()))?
        };

        let model = ModelForCausalLM::new(&qwen_config, vb)
            .map_err(|e| ModelLoadError::WeightsFailed(format!("model: {}", e)))?;

        tracing::info!(
            shards = weight_paths.len(),
            "Candle text generator loaded successfully"
        );

        Ok(Self {
            inner: Arc::new(QwenInner {
                model: Mutex::new(model),
                tokenizer,
                stop_tokens,
                device,
            }),
        })
    }
}

#[async_trait]
impl TextGenerator for CandleQwenGenerator {
    async fn generate(
        &self,
        prompt: &str,
        max_new_tokens: usize,
    ) -> Result<String, TextGenerationError> {
        let inner = Arc::clone(&self.inner);
        let prompt = prompt.to_string();

        tokio::task::spawn_blocking(move || inner.generate(&prompt, max_new_tokens))
            .await
            .map_err(|e| TextGenerationError::InferenceFailed(format!("task join: {}", e)))?
    }
}

impl QwenInner {
    fn generate(&self, prompt: &str, max_new_tokens: usize) -> Result<String, TextGenerationError> {
        let failed = |e: candle_core::Error| TextGenerationError::InferenceFailed(e.to_string());

        let encoding = self
            .tokenizer
            .encode(prompt, false)
            .map_err(|e| TextGenerationError::TokenizationFailed(e.to_string()))?;
        let prompt_tokens = encoding.get_ids().to_vec();
        if prompt_tokens.is_empty() {
            return Err(TextGenerationError::TokenizationFailed(
                "prompt produced no tokens".to_string(),
            ));
        }

        let mut model = self.model.blocking_lock();
        model.clear_kv_cache();

        let started = std::time::Instant::now();
        let mut generated: Vec<u32> = Vec::new();
        let mut input = prompt_tokens.clone();
        let mut offset = 0;

        for _ in 0..max_new_tokens {
            let input_tensor = Tensor::new(input.as_slice(), &self.device)
                .and_then(|t| t.unsqueeze(0))
                .map_err(failed)?;

            let next_token = model
                .forward(&input_tensor, offset)
                .and_then(|logits| logits.squeeze(0))
                .and_then(|logits| logits.squeeze(0))
                .and_then(|logits| logits.to_dtype(DType::F32))
                .and_then(|logits| logits.argmax(0))
                .and_then(|t| t.to_scalar::<u32>())
                .map_err(failed)?;

            offset += input.len();

            if self.stop_tokens.contains(&next_token) {
                break;
            }

            generated.push(next_token);
            input = vec![next_token];
        }

        model.clear_kv_cache();

        tracing::debug!(
            prompt_tokens = prompt_tokens.len(),
            generated_tokens = generated.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Text generation finished"
        );

        self.tokenizer
            .decode(&generated, true)
            .map_err(|e| TextGenerationError::TokenizationFailed(format!("decode: {}", e)))
    }
}
