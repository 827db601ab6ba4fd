mod accessibility_record;
mod audio_file_name;
mod city_point;
mod decoding_options;
mod model_config;
mod query_result;
mod query_stage;
mod recognized_entity;
mod structured_reply;
mod synthesized_speech;

pub use accessibility_record::{AccessibilityRecord, TransportOption, Venue};
pub use audio_file_name::{AudioFileName, InvalidAudioFileName, WAV_EXTENSION};
pub use city_point::CityPoint;
pub use decoding_options::{DEFAULT_LANGUAGE, DecodingOptions};
pub use model_config::{
    ComputeDevice, DEFAULT_CACHE_DIR, DEFAULT_ENTITY_RECOGNIZER_MODEL,
    DEFAULT_SPEECH_SYNTHESIZER_MODEL, DEFAULT_SPEECH_SYNTHESIZER_ONNX_FILE,
    DEFAULT_SPEECH_TO_TEXT_MODEL, DEFAULT_TEXT_GENERATOR_MODEL,
    ModelConfig, Precision,
};
pub use query_result::QueryResult;
pub use query_stage::QueryStage;
pub use recognized_entity::{RecognizedEntity, first_location};
pub use structured_reply::{MISSING_RESPONSE_TEXT, StructuredReply};
pub use synthesized_speech::SynthesizedSpeech;
