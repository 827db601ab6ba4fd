const LOCATION_TAG: &str = "LOC";

#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedEntity {
    pub word: String,
    pub label: String,
    pub score: f32,
    pub start: usize,
    pub end: usize,
}

impl RecognizedEntity {
    pub fn is_location(&self) -> bool {
        self.label.contains(LOCATION_TAG)
    }
}

/// Returns the word of the first location-tagged entity, if any.
pub fn first_location(entities: &[RecognizedEntity]) -> Option<&str> {
    entities
        .iter()
        .find(|e| e.is_location())
        .map(|e| e.word.as_str())
}
