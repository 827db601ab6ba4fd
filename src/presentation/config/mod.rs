mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    BackendSetting, CityDataSettings, ENV_PREFIX, ENV_SEPARATOR, GenerationSettings,
    LoggingSettings, OpenAiSettings, ProvidersSettings, ServerSettings, Settings, StorageSettings,
};
