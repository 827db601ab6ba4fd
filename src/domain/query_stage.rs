use std::fmt;

/// Pipeline position of a voice query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryStage {
    Received,
    Transcribing,
    EntityExtracting,
    DataLookup,
    PromptComposing,
    Generating,
    ReplyParsing,
    Synthesizing,
    Completed,
    Failed,
}

impl QueryStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryStage::Received => "received",
            QueryStage::Transcribing => "transcribing",
            QueryStage::EntityExtracting => "entity_extracting",
            QueryStage::DataLookup => "data_lookup",
            QueryStage::PromptComposing => "prompt_composing",
            QueryStage::Generating => "generating",
            QueryStage::ReplyParsing => "reply_parsing",
            QueryStage::Synthesizing => "synthesizing",
            QueryStage::Completed => "completed",
            QueryStage::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, QueryStage::Completed | QueryStage::Failed)
    }

    /// The stage that follows a successful step, `None` once terminal.
    pub fn next(&self) -> Option<QueryStage> {
        match self {
            QueryStage::Received => Some(QueryStage::Transcribing),
            QueryStage::Transcribing => Some(QueryStage::EntityExtracting),
            QueryStage::EntityExtracting => Some(QueryStage::DataLookup),
            QueryStage::DataLookup => Some(QueryStage::PromptComposing),
            QueryStage::PromptComposing => Some(QueryStage::Generating),
            QueryStage::Generating => Some(QueryStage::ReplyParsing),
            QueryStage::ReplyParsing => Some(QueryStage::Synthesizing),
            QueryStage::Synthesizing => Some(QueryStage::Completed),
            QueryStage::Completed | QueryStage::Failed => None,
        }
    }
}

impl fmt::Display for QueryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
