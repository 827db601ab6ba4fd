mod model_registry;
mod prompt_composer;
mod query_service;
mod response_parser;
mod wav_encoder;

pub use model_registry::{Capability, ModelRegistry, RegistryError};
pub use prompt_composer::PromptComposer;
pub use query_service::{
    DEFAULT_AUDIO_URL_PREFIX, DEFAULT_MAX_NEW_TOKENS, QueryError, QueryOptions, QueryService,
};
pub use response_parser::{MalformedModelOutput, extract_structured_reply};
pub use wav_encoder::encode_wav;
