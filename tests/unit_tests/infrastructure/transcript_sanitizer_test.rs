use safepath::infrastructure::observability::sanitize_for_log;

#[test]
fn given_blank_text_when_sanitizing_then_marked_empty() {
    assert_eq!(sanitize_for_log("   "), "[EMPTY]");
}

#[test]
fn given_short_text_when_sanitizing_then_trimmed_only() {
    assert_eq!(sanitize_for_log("  Beşiktaş'ta tuvalet  "), "Beşiktaş'ta tuvalet");
}

#[test]
fn given_long_turkish_text_when_sanitizing_then_truncated_on_char_boundary() {
    let text = "ş".repeat(150);

    let sanitized = sanitize_for_log(&text);

    assert!(sanitized.starts_with(&"ş".repeat(100)));
    assert!(sanitized.ends_with("... (150 chars total)"));
}

#[test]
fn given_credentials_when_sanitizing_then_values_redacted() {
    let sanitized = sanitize_for_log("token=abc123 and password=hunter2&x=1");

    assert!(sanitized.contains("token=[REDACTED]"));
    assert!(sanitized.contains("password=[REDACTED]&x=1"));
    assert!(!sanitized.contains("abc123"));
    assert!(!sanitized.contains("hunter2"));
}

#[test]
fn given_repeated_secret_when_sanitizing_then_every_occurrence_redacted() {
    let sanitized = sanitize_for_log("token=one token=two");

    assert_eq!(sanitized, "token=[REDACTED] token=[REDACTED]");
}
