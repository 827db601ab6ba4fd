use safepath::domain::{RecognizedEntity, first_location};

fn entity(word: &str, label: &str) -> RecognizedEntity {
    RecognizedEntity {
        word: word.to_string(),
        label: label.to_string(),
        score: 0.9,
        start: 0,
        end: word.len(),
    }
}

#[test]
fn given_mixed_entities_when_finding_location_then_returns_first_loc() {
    let entities = vec![
        entity("Ahmet", "PER"),
        entity("Kadıköy", "B-LOC"),
        entity("Beşiktaş", "LOC"),
    ];

    assert_eq!(first_location(&entities), Some("Kadıköy"));
}

#[test]
fn given_no_location_when_finding_location_then_returns_none() {
    let entities = vec![entity("Ahmet", "PER"), entity("İBB", "ORG")];

    assert_eq!(first_location(&entities), None);
    assert_eq!(first_location(&[]), None);
}
