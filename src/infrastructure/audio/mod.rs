pub mod audio_decoder;
mod candle_whisper_engine;
mod mel_filters;
mod openai_whisper_engine;

pub use audio_decoder::{AudioDecodeError, DecodedAudio, decode_audio, decode_for_whisper};
pub use candle_whisper_engine::CandleWhisperEngine;
pub use mel_filters::mel_filter_bank;
pub use openai_whisper_engine::{
    DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_TIMEOUT, DEFAULT_OPENAI_TRANSCRIPTION_MODEL,
    OpenAiWhisperEngine,
};
