mod configured_model_provider;

pub use configured_model_provider::ConfiguredModelProvider;
