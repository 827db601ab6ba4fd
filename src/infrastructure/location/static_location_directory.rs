use std::collections::HashMap;

use crate::application::ports::LocationDirectory;
use crate::domain::{AccessibilityRecord, TransportOption, Venue};

/// Fixed in-memory accessibility records keyed by lowercase district name.
pub struct StaticLocationDirectory {
    records: HashMap<String, AccessibilityRecord>,
}

impl StaticLocationDirectory {
    pub fn new(records: HashMap<String, AccessibilityRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|(name, record)| (normalize(&name), record))
            .collect();
        Self { records }
    }

    /// The Istanbul districts the assistant knows about out of the box.
    pub fn istanbul() -> Self {
        let mut records = HashMap::new();

        records.insert(
            "beşiktaş".to_string(),
            AccessibilityRecord {
                safety_score: 9,
                accessible_toilets: vec![Venue::new("Beşiktaş Belediyesi", &["rampa", "geniş kapı"])],
                accessible_food: vec![
                    Venue::new("Starbucks Beşiktaş", &["rampa girişi", "geniş koridor"]),
                    Venue::new("Mado Beşiktaş", &["zemin kat"]),
                ],
                transport: vec![TransportOption::new("Metro", "Asansör ve rampa mevcut")],
            },
        );

        records.insert(
            "kadıköy".to_string(),
            AccessibilityRecord {
                safety_score: 8,
                accessible_toilets: vec![Venue::new("Kadıköy Belediyesi", &["rampa"])],
                accessible_food: vec![Venue::new("Starbucks Bahariye", &["zemin kat", "rampa"])],
                transport: Vec::new(),
            },
        );

        Self::new(records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for StaticLocationDirectory {
    fn default() -> Self {
        Self::istanbul()
    }
}

impl LocationDirectory for StaticLocationDirectory {
    fn resolve(&self, location: Option<&str>) -> AccessibilityRecord {
        let Some(name) = location else {
            return AccessibilityRecord::unknown();
        };

        match self.records.get(&normalize(name)) {
            Some(record) => record.clone(),
            None => {
                tracing::debug!(location = name, "No accessibility record for location");
                AccessibilityRecord::unknown()
            }
        }
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
