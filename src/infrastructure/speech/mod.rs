mod character_vocabulary;
mod onnx_mms_synthesizer;
mod openai_speech_synthesizer;

pub use character_vocabulary::CharacterVocabulary;
pub use onnx_mms_synthesizer::OnnxMmsSynthesizer;
pub use openai_speech_synthesizer::{
    DEFAULT_OPENAI_SPEECH_MODEL, DEFAULT_OPENAI_VOICE, OpenAiSpeechSynthesizer,
};
