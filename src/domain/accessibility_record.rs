use serde::Serialize;

/// Accessibility facts known about a district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessibilityRecord {
    pub safety_score: i32,
    pub accessible_toilets: Vec<Venue>,
    pub accessible_food: Vec<Venue>,
    pub transport: Vec<TransportOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Venue {
    pub name: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransportOption {
    #[serde(rename = "type")]
    pub kind: String,
    pub accessibility: String,
}

impl AccessibilityRecord {
    pub const DEFAULT_SAFETY_SCORE: i32 = 7;

    /// Record returned for districts with no entry.
    pub fn unknown() -> Self {
        Self {
            safety_score: Self::DEFAULT_SAFETY_SCORE,
            accessible_toilets: Vec::new(),
            accessible_food: Vec::new(),
            transport: Vec::new(),
        }
    }
}

impl Default for AccessibilityRecord {
    fn default() -> Self {
        Self::unknown()
    }
}

impl Venue {
    pub fn new(name: impl Into<String>, features: &[&str]) -> Self {
        Self {
            name: name.into(),
            features: features.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl TransportOption {
    pub fn new(kind: impl Into<String>, accessibility: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            accessibility: accessibility.into(),
        }
    }
}
