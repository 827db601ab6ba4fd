use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use candle_core::{D, DType, Device, Module, Tensor};
use candle_nn::{Linear, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use hf_hub::api::sync::ApiRepo;
use serde::Deserialize;
use tokenizers::Tokenizer;

use crate::application::ports::{EntityRecognitionError, EntityRecognizer, ModelLoadError};
use crate::domain::{ModelConfig, RecognizedEntity};
use crate::infrastructure::inference::{hub, select_device, select_dtype};

use super::entity_grouping::{TokenPrediction, group_entities};

const CONTINUATION_PREFIX: &str = "##";

/// BERT encoder with a token-classification head.
pub struct CandleNerRecognizer {
    inner: Arc<NerInner>,
}

struct NerInner {
    encoder: BertModel,
    classifier: Linear,
    tokenizer: Tokenizer,
    labels: Vec<String>,
    device: Device,
}

#[derive(Deserialize)]
struct LabelConfig {
    id2label: BTreeMap<String, String>,
}

impl CandleNerRecognizer {
    pub fn load(config: &ModelConfig) -> Result<Self, ModelLoadError> {
        let device = select_device(config.device)?;
        let model_id = config.entity_recognizer_model.as_str();

        tracing::info!(
            device = ?device,
            model = model_id,
            "Initializing Candle NER model"
        );

        let repo = hub::open_repo(&config.cache_dir, model_id)?;
        let config_path = hub::fetch(&repo, "config.json")?;

        let bert_config: BertConfig = hub::read_json(&config_path)?;
        let label_config: LabelConfig = hub::read_json(&config_path)?;
        let labels = ordered_labels(label_config.id2label)?;

        let tokenizer = load_tokenizer(&repo)?;
        let dtype = select_dtype(config.precision, &device);
        let vb = load_weights(&repo, dtype, &device)?;

        let encoder = BertModel::load(vb.clone(), &bert_config)
            .map_err(|e| ModelLoadError::WeightsFailed(format!("encoder: {}", e)))?;
        let classifier = candle_nn::linear(bert_config.hidden_size, labels.len(), vb.pp("classifier"))
            .map_err(|e| ModelLoadError::WeightsFailed(format!("classifier: {}", e)))?;

        tracing::info!(labels = labels.len(), "Candle NER model loaded successfully");

        Ok(Self {
            inner: Arc::new(NerInner {
                encoder,
                classifier,
                tokenizer,
                labels,
                device,
            }),
        })
    }
}

#[async_trait]
impl EntityRecognizer for CandleNerRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<RecognizedEntity>, EntityRecognitionError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let inner = Arc::clone(&self.inner);
        let text = text.to_string();

        tokio::task::spawn_blocking(move || inner.recognize(&text))
            .await
            .map_err(|e| EntityRecognitionError::InferenceFailed(format!("task join: {}", e)))?
    }
}

impl NerInner {
    fn recognize(&self, text: &str) -> Result<Vec<RecognizedEntity>, EntityRecognitionError> {
        let failed = |e: candle_core::Error| EntityRecognitionError::InferenceFailed(e.to_string());

        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| EntityRecognitionError::TokenizationFailed(e.to_string()))?;

        let ids = encoding.get_ids();
        let seq_len = ids.len();

        let input_ids = Tensor::new(ids, &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(failed)?;
        let token_type_ids = input_ids.zeros_like().map_err(failed)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(failed)?;

        let hidden = self
            .encoder
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(failed)?;
        let probabilities = self
            .classifier
            .forward(&hidden)
            .and_then(|logits| logits.to_dtype(DType::F32))
            .and_then(|logits| candle_nn::ops::softmax(&logits, D::Minus1))
            .and_then(|p| p.squeeze(0))
            .and_then(|p| p.to_vec2::<f32>())
            .map_err(failed)?;

        let special = encoding.get_special_tokens_mask();
        let offsets = encoding.get_offsets();
        let tokens = encoding.get_tokens();

        let predictions: Vec<TokenPrediction> = (0..seq_len)
            .filter(|&i| special[i] == 0)
            .filter_map(|i| {
                let (label_id, score) = argmax(&probabilities[i])?;
                Some(TokenPrediction {
                    label: self.labels.get(label_id)?.clone(),
                    score,
                    start: offsets[i].0,
                    end: offsets[i].1,
                    continuation: tokens[i].starts_with(CONTINUATION_PREFIX),
                })
            })
            .collect();

        Ok(group_entities(&predictions, text))
    }
}

fn argmax(row: &[f32]) -> Option<(usize, f32)> {
    row.iter()
        .copied()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(&b.1))
}

fn ordered_labels(id2label: BTreeMap<String, String>) -> Result<Vec<String>, ModelLoadError> {
    let mut indexed: Vec<(usize, String)> = id2label
        .into_iter()
        .map(|(id, label)| {
            id.parse::<usize>()
                .map(|id| (id, label))
                .map_err(|e| ModelLoadError::InvalidConfig(format!("id2label key {}: {}", id, e)))
        })
        .collect::<Result<_, _>>()?;
    indexed.sort_by_key(|(id, _)| *id);

    if indexed.iter().enumerate().any(|(i, (id, _))| i != *id) {
        return Err(ModelLoadError::InvalidConfig(
            "id2label ids are not contiguous".to_string(),
        ));
    }

    Ok(indexed.into_iter().map(|(_, label)| label).collect())
}

/// Prefers `tokenizer.json`; older checkpoints only ship `vocab.txt`.
fn load_tokenizer(repo: &ApiRepo) -> Result<Tokenizer, ModelLoadError> {
    if let Ok(path) = repo.get("tokenizer.json") {
        return Tokenizer::from_file(&path)
            .map_err(|e| ModelLoadError::TokenizerFailed(e.to_string()));
    }

    let vocab_path = hub::fetch(repo, "vocab.txt")?;
    wordpiece_tokenizer(&vocab_path)
}

fn wordpiece_tokenizer(vocab_path: &Path) -> Result<Tokenizer, ModelLoadError> {
    use tokenizers::decoders::wordpiece::WordPiece as WordPieceDecoder;
    use tokenizers::models::wordpiece::WordPiece;
    use tokenizers::normalizers::bert::BertNormalizer;
    use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
    use tokenizers::processors::bert::BertProcessing;

    let vocab = vocab_path
        .to_str()
        .ok_or_else(|| ModelLoadError::TokenizerFailed("vocab path is not UTF-8".to_string()))?;

    let model = WordPiece::from_file(vocab)
        .unk_token("[UNK]".to_string())
        .build()
        .map_err(|e| ModelLoadError::TokenizerFailed(format!("vocab.txt: {}", e)))?;

    let mut tokenizer = Tokenizer::new(model);
    let special_id = |token: &str| {
        tokenizer
            .token_to_id(token)
            .ok_or_else(|| ModelLoadError::TokenizerFailed(format!("missing {}", token)))
    };
    let cls = special_id("[CLS]")?;
    let sep = special_id("[SEP]")?;

    tokenizer
        .with_normalizer(Some(BertNormalizer::new(true, true, None, false)))
        .with_pre_tokenizer(Some(BertPreTokenizer))
        .with_post_processor(Some(BertProcessing::new(
            ("[SEP]".to_string(), sep),
            ("[CLS]".to_string(), cls),
        )))
        .with_decoder(Some(WordPieceDecoder::default()));

    Ok(tokenizer)
}

fn load_weights(repo: &ApiRepo, dtype: DType, device: &Device) -> Result<VarBuilder<'static>, ModelLoadError> {
    if let Ok(path) = repo.get("model.safetensors") {
        // SAFETY: safetensors files are memory-mapped read-only
        return unsafe {
            VarBuilder::from_mmaped_safetensors(&[path], dtype, device)
                .map_err(|e| ModelLoadError::WeightsFailed(e.to_string()))
        };
    }

    tracing::info!("model.safetensors not found, falling back to pytorch_model.bin");
    let path = hub::fetch(repo, "pytorch_model.bin")?;
    VarBuilder::from_pth(&path, dtype, device)
        .map_err(|e| ModelLoadError::WeightsFailed(format!("pytorch_model.bin: {}", e)))
}
