use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::domain::{DEFAULT_LANGUAGE, DecodingOptions, ModelConfig};
use crate::infrastructure::audio::DEFAULT_OPENAI_TIMEOUT;
use crate::infrastructure::city_data::{DEFAULT_CITY_DATA_TIMEOUT, DEFAULT_CITY_DATA_URL};
use crate::infrastructure::observability::TracingConfig;

use super::Environment;

pub const ENV_PREFIX: &str = "APP";
pub const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub models: ModelConfig,
    pub providers: ProvidersSettings,
    pub generation: GenerationSettings,
    pub storage: StorageSettings,
    pub city_data: CityDataSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Built-in defaults, then `appsettings.{environment}` if present, then
    /// `APP__SECTION__KEY` environment variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let file_name = format!("appsettings.{}", environment.as_str());

        Config::builder()
            .add_source(File::with_name(&file_name).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn tracing_config(&self, environment: Environment) -> TracingConfig {
        TracingConfig::new(
            environment.as_str(),
            self.logging.level.clone(),
            self.logging.enable_json,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

impl ServerSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_mb: 25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendSetting {
    #[default]
    Local,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProvidersSettings {
    pub speech_to_text: BackendSetting,
    pub text_generator: BackendSetting,
    pub speech_synthesizer: BackendSetting,
    pub openai: OpenAiSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenAiSettings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub transcription_model: Option<String>,
    pub chat_model: Option<String>,
    pub speech_model: Option<String>,
    pub voice: Option<String>,
    /// Upper bound for one remote model call, connection included.
    pub timeout_secs: u64,
}

impl OpenAiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            transcription_model: None,
            chat_model: None,
            speech_model: None,
            voice: None,
            timeout_secs: DEFAULT_OPENAI_TIMEOUT.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub language: String,
    pub timestamps: bool,
    pub max_new_tokens: usize,
}

impl GenerationSettings {
    pub fn decoding_options(&self) -> DecodingOptions {
        DecodingOptions {
            timestamps: self.timestamps,
            ..DecodingOptions::for_language(&self.language)
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            timestamps: false,
            max_new_tokens: 256,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub temp_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            temp_dir: PathBuf::from("temp"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CityDataSettings {
    pub url: String,
    pub timeout_secs: u64,
}

impl CityDataSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for CityDataSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_CITY_DATA_URL.to_string(),
            timeout_secs: DEFAULT_CITY_DATA_TIMEOUT.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: TracingConfig::DEFAULT_FILTER.to_string(),
            enable_json: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }
}
