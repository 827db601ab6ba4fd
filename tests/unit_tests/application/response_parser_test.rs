use safepath::application::services::{MalformedModelOutput, extract_structured_reply};

#[test]
fn given_reply_with_noise_around_it_when_parsing_then_extracts_object() {
    let generated =
        r#"noise {"thought":"a","responseText":"b","suggestedActions":[]} trailing"#;

    let reply = extract_structured_reply(generated).unwrap();

    assert_eq!(reply.thought, "a");
    assert_eq!(reply.response_text, "b");
    assert!(reply.suggested_actions.is_empty());
}

#[test]
fn given_echoed_prompt_before_reply_when_parsing_then_last_object_wins() {
    let generated = r#"{"thought": "...", "responseText": "şablon"} assistant
{"thought":"gerçek","responseText":"Rampa mevcut.","suggestedActions":["Git"]}"#;

    let reply = extract_structured_reply(generated).unwrap();

    assert_eq!(reply.response_text, "Rampa mevcut.");
    assert_eq!(reply.suggested_actions, vec!["Git".to_string()]);
}

#[test]
fn given_no_braces_when_parsing_then_reports_missing_opening_brace() {
    assert_eq!(
        extract_structured_reply("Üzgünüm, yardımcı olamam."),
        Err(MalformedModelOutput::NoOpeningBrace)
    );
}

#[test]
fn given_only_opening_brace_when_parsing_then_reports_missing_closing_brace() {
    assert_eq!(
        extract_structured_reply(r#"{"thought": "kesildi"#),
        Err(MalformedModelOutput::NoClosingBrace)
    );
}

#[test]
fn given_closing_brace_before_last_opening_when_parsing_then_reports_empty_span() {
    assert_eq!(
        extract_structured_reply("} ve sonra {"),
        Err(MalformedModelOutput::EmptySpan)
    );
}

#[test]
fn given_nested_object_when_parsing_then_inner_span_fails_to_decode_as_reply() {
    let generated =
        r#"{"thought":"a","responseText":"b","suggestedActions":[],"meta":{"k":1}}"#;

    let result = extract_structured_reply(generated);

    assert!(matches!(result, Err(MalformedModelOutput::InvalidJson(_))));
}

#[test]
fn given_object_missing_keys_when_parsing_then_defaults_fill_in() {
    let reply = extract_structured_reply(r#"{"thought":"yalnızca düşünce"}"#).unwrap();

    assert_eq!(reply.response_text, "Yanıt metni bulunamadı.");
    assert!(reply.suggested_actions.is_empty());
}
