use std::collections::HashMap;

/// Character-level tokenizer used by VITS/MMS speech models.
///
/// Characters missing from the vocabulary are dropped. With `add_blank` the
/// pad id is placed before, between and after every character.
#[derive(Debug, Clone)]
pub struct CharacterVocabulary {
    ids: HashMap<char, i64>,
    pad_id: i64,
    add_blank: bool,
    lowercase: bool,
}

impl CharacterVocabulary {
    pub fn new(vocab: HashMap<String, i64>, pad_token: &str, add_blank: bool, lowercase: bool) -> Self {
        let pad_id = vocab.get(pad_token).copied().unwrap_or(0);
        let ids = vocab
            .into_iter()
            .filter_map(|(token, id)| {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some((c, id)),
                    _ => None,
                }
            })
            .collect();

        Self {
            ids,
            pad_id,
            add_blank,
            lowercase,
        }
    }

    pub fn encode(&self, text: &str) -> Vec<i64> {
        let normalized = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let known: Vec<i64> = normalized
            .chars()
            .filter_map(|c| self.ids.get(&c).copied())
            .collect();

        if !self.add_blank || known.is_empty() {
            return known;
        }

        let mut interleaved = Vec::with_capacity(known.len() * 2 + 1);
        interleaved.push(self.pad_id);
        for id in known {
            interleaved.push(id);
            interleaved.push(self.pad_id);
        }
        interleaved
    }
}
