mod audio_store;
mod city_data_source;
mod entity_recognizer;
mod location_directory;
mod model_provider;
mod speech_synthesizer;
mod text_generator;
mod transcription_engine;

pub use audio_store::{AudioStore, AudioStoreError};
pub use city_data_source::{CityDataError, CityDataSource};
pub use entity_recognizer::{EntityRecognitionError, EntityRecognizer};
pub use location_directory::LocationDirectory;
pub use model_provider::{ModelLoadError, ModelProvider};
pub use speech_synthesizer::{SpeechSynthesisError, SpeechSynthesizer};
pub use text_generator::{TextGenerationError, TextGenerator};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
