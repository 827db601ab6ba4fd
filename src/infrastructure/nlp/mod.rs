mod candle_ner_recognizer;
mod entity_grouping;

pub use candle_ner_recognizer::CandleNerRecognizer;
pub use entity_grouping::{OUTSIDE_LABEL, TokenPrediction, group_entities};
