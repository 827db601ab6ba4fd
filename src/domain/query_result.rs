use serde::Serialize;

use super::StructuredReply;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub user_input: String,
    pub assistant_response: StructuredReply,
    pub assistant_response_audio_url: String,
}
