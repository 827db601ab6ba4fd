use safepath::application::ports::{ModelLoadError, ModelProvider};
use safepath::domain::ModelConfig;
use safepath::infrastructure::models::ConfiguredModelProvider;
use safepath::presentation::config::{BackendSetting, OpenAiSettings, ProvidersSettings};

fn remote_providers(api_key: Option<&str>) -> ProvidersSettings {
    ProvidersSettings {
        speech_to_text: BackendSetting::OpenAi,
        text_generator: BackendSetting::OpenAi,
        speech_synthesizer: BackendSetting::OpenAi,
        openai: OpenAiSettings {
            api_key: api_key.map(String::from),
            base_url: Some("http://127.0.0.1:9/v1".to_string()),
            ..OpenAiSettings::default()
        },
    }
}

#[test]
fn given_openai_backend_without_key_when_loading_then_invalid_config() {
    let provider = ConfiguredModelProvider::new(ModelConfig::default(), remote_providers(None));

    assert!(matches!(
        provider.load_speech_to_text(),
        Err(ModelLoadError::InvalidConfig(_))
    ));
    assert!(matches!(
        provider.load_text_generator(),
        Err(ModelLoadError::InvalidConfig(_))
    ));
    assert!(matches!(
        provider.load_speech_synthesizer(),
        Err(ModelLoadError::InvalidConfig(_))
    ));
}

#[test]
fn given_openai_backend_with_empty_key_when_loading_then_invalid_config() {
    let provider =
        ConfiguredModelProvider::new(ModelConfig::default(), remote_providers(Some("")));

    assert!(matches!(
        provider.load_text_generator(),
        Err(ModelLoadError::InvalidConfig(_))
    ));
}

#[test]
fn given_openai_backend_with_key_when_loading_then_no_download_is_needed() {
    let provider =
        ConfiguredModelProvider::new(ModelConfig::default(), remote_providers(Some("sk-test")));

    assert!(provider.load_speech_to_text().is_ok());
    assert!(provider.load_text_generator().is_ok());
    assert!(provider.load_speech_synthesizer().is_ok());
}
