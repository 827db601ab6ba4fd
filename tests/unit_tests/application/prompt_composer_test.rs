use safepath::application::services::PromptComposer;
use safepath::domain::{AccessibilityRecord, TransportOption, Venue};

fn besiktas_record() -> AccessibilityRecord {
    AccessibilityRecord {
        safety_score: 9,
        accessible_toilets: vec![Venue::new("Beşiktaş Belediyesi", &["rampa", "geniş kapı"])],
        accessible_food: Vec::new(),
        transport: vec![TransportOption::new("Metro", "Asansör ve rampa mevcut")],
    }
}

#[test]
fn given_location_and_record_when_composing_then_card_names_location_and_score() {
    let prompt = PromptComposer::new().compose(
        "Beşiktaş'ta tuvalet var mı?",
        Some("Beşiktaş"),
        &besiktas_record(),
    );

    assert!(prompt.contains("### BÖLGE BİLGİ KARTI: Beşiktaş ###"));
    assert!(prompt.contains("Güvenlik Skoru: 9/10"));
    assert!(prompt.contains(r#"[{"name":"Beşiktaş Belediyesi","features":["rampa","geniş kapı"]}]"#));
    assert!(prompt.contains(r#"[{"type":"Metro","accessibility":"Asansör ve rampa mevcut"}]"#));
    assert!(prompt.contains("Kullanıcı Sorusu: \"Beşiktaş'ta tuvalet var mı?\""));
}

#[test]
fn given_no_location_when_composing_then_card_says_not_detected() {
    let prompt = PromptComposer::new().compose("Merhaba", None, &AccessibilityRecord::unknown());

    assert!(prompt.contains("BÖLGE BİLGİ KARTI: Tespit Edilemedi"));
    assert!(prompt.contains("Güvenlik Skoru: 7/10"));
}

#[test]
fn given_any_input_when_composing_then_prompt_is_chatml_ending_with_assistant_turn() {
    let prompt = PromptComposer::new().compose("soru", None, &AccessibilityRecord::unknown());

    assert!(prompt.starts_with("<|im_start|>system\n"));
    assert!(prompt.contains("\"responseText\""));
    assert!(prompt.contains("\"suggestedActions\""));
    assert!(prompt.ends_with("<|im_start|>assistant\n"));
}
