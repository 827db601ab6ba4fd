use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_SPEECH_TO_TEXT_MODEL: &str = "openai/whisper-large-v3";
pub const DEFAULT_ENTITY_RECOGNIZER_MODEL: &str = "savasy/bert-base-turkish-ner-cased";
pub const DEFAULT_TEXT_GENERATOR_MODEL: &str = "Qwen/Qwen2.5-7B-Instruct";
pub const DEFAULT_SPEECH_SYNTHESIZER_MODEL: &str = "facebook/mms-tts-tur";
pub const DEFAULT_SPEECH_SYNTHESIZER_ONNX_FILE: &str = "onnx/model.onnx";
pub const DEFAULT_CACHE_DIR: &str = "models_cache";

/// Static parameters shared by every model the service loads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub speech_to_text_model: String,
    pub entity_recognizer_model: String,
    pub text_generator_model: String,
    pub speech_synthesizer_model: String,
    /// Repository holding the ONNX export; the synthesizer model repo when unset.
    pub speech_synthesizer_onnx_repo: Option<String>,
    pub speech_synthesizer_onnx_file: String,
    pub cache_dir: PathBuf,
    pub device: ComputeDevice,
    pub precision: Precision,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            speech_to_text_model: DEFAULT_SPEECH_TO_TEXT_MODEL.to_string(),
            entity_recognizer_model: DEFAULT_ENTITY_RECOGNIZER_MODEL.to_string(),
            text_generator_model: DEFAULT_TEXT_GENERATOR_MODEL.to_string(),
            speech_synthesizer_model: DEFAULT_SPEECH_SYNTHESIZER_MODEL.to_string(),
            speech_synthesizer_onnx_repo: None,
            speech_synthesizer_onnx_file: DEFAULT_SPEECH_SYNTHESIZER_ONNX_FILE.to_string(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            device: ComputeDevice::Auto,
            precision: Precision::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComputeDevice {
    Auto,
    Cpu,
    Cuda,
    Metal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Auto,
    F32,
    F16,
    Bf16,
}

impl Precision {
    /// Half precision on accelerators, full precision on the CPU.
    pub fn resolve(self, accelerated: bool) -> Precision {
        match self {
            Precision::Auto if accelerated => Precision::F16,
            Precision::Auto => Precision::F32,
            explicit => explicit,
        }
    }
}

impl fmt::Display for ComputeDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComputeDevice::Auto => "auto",
            ComputeDevice::Cpu => "cpu",
            ComputeDevice::Cuda => "cuda",
            ComputeDevice::Metal => "metal",
        };
        f.write_str(name)
    }
}
