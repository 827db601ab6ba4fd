use serde::{Deserialize, Serialize};

pub const MISSING_RESPONSE_TEXT: &str = "Yanıt metni bulunamadı.";

/// The JSON object the language model is instructed to answer with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredReply {
    #[serde(default)]
    pub thought: String,
    #[serde(default = "missing_response_text")]
    pub response_text: String,
    #[serde(default)]
    pub suggested_actions: Vec<String>,
}

fn missing_response_text() -> String {
    MISSING_RESPONSE_TEXT.to_string()
}
