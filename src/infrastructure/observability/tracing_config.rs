/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub filter: String,
    pub json_format: bool,
}

impl TracingConfig {
    pub const DEFAULT_FILTER: &'static str = "info,safepath=debug,tower_http=debug";

    pub fn new(environment: impl Into<String>, filter: impl Into<String>, json_format: bool) -> Self {
        Self {
            environment: environment.into(),
            filter: filter.into(),
            json_format,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            filter: Self::DEFAULT_FILTER.to_string(),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }
}
