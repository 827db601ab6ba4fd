use crate::domain::RecognizedEntity;

pub const OUTSIDE_LABEL: &str = "O";

/// Per-token output of a token-classification model.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPrediction {
    pub label: String,
    pub score: f32,
    pub start: usize,
    pub end: usize,
    /// `##`-prefixed word piece continuing the previous token's word.
    pub continuation: bool,
}

/// Groups BIO-tagged tokens into whole entities.
///
/// Word-piece continuations always join the entity of their word. A `B-`
/// tag or a change of entity type starts a new entity. The entity text is
/// sliced from `text` using the token byte offsets.
pub fn group_entities(tokens: &[TokenPrediction], text: &str) -> Vec<RecognizedEntity> {
    let mut entities = Vec::new();
    let mut current: Option<Group> = None;

    for token in tokens {
        if token.continuation {
            if let Some(group) = current.as_mut() {
                group.extend(token);
                continue;
            }
        }

        if token.label == OUTSIDE_LABEL {
            flush(&mut current, &mut entities, text);
            continue;
        }

        let (is_begin, kind) = split_tag(&token.label);
        match current.as_mut() {
            Some(group) if !is_begin && group.kind == kind => group.extend(token),
            _ => {
                flush(&mut current, &mut entities, text);
                current = Some(Group::start(kind, token));
            }
        }
    }

    flush(&mut current, &mut entities, text);
    entities
}

struct Group {
    kind: String,
    start: usize,
    end: usize,
    scores: Vec<f32>,
}

impl Group {
    fn start(kind: &str, token: &TokenPrediction) -> Self {
        Self {
            kind: kind.to_string(),
            start: token.start,
            end: token.end,
            scores: vec![token.score],
        }
    }

    fn extend(&mut self, token: &TokenPrediction) {
        self.end = self.end.max(token.end);
        self.scores.push(token.score);
    }
}

fn flush(current: &mut Option<Group>, entities: &mut Vec<RecognizedEntity>, text: &str) {
    let Some(group) = current.take() else {
        return;
    };

    let word = text.get(group.start..group.end).unwrap_or_default().trim();
    if word.is_empty() {
        return;
    }

    entities.push(RecognizedEntity {
        word: word.to_string(),
        label: group.kind,
        score: group.scores.iter().sum::<f32>() / group.scores.len() as f32,
        start: group.start,
        end: group.end,
    });
}

fn split_tag(label: &str) -> (bool, &str) {
    if let Some(kind) = label.strip_prefix("B-") {
        (true, kind)
    } else if let Some(kind) = label.strip_prefix("I-") {
        (false, kind)
    } else {
        (false, label)
    }
}
