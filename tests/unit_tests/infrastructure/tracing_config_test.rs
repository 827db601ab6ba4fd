use safepath::infrastructure::observability::TracingConfig;

#[test]
fn given_explicit_values_when_creating_config_then_fields_are_kept() {
    let config = TracingConfig::new("prod", "warn", true);

    assert_eq!(config.environment, "prod");
    assert_eq!(config.filter, "warn");
    assert!(config.json_format);
}

#[test]
fn given_default_config_when_created_then_uses_crate_filter() {
    let config = TracingConfig::default();

    assert_eq!(config.filter, "info,safepath=debug,tower_http=debug");
}
