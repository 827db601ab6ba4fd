use crate::domain::StructuredReply;

/// Best-effort extraction of the reply object from raw model output.
///
/// Decodes the span from the last `{` through the last `}`. Output that
/// carries further braces after the payload, or a payload with nested
/// objects, is not recovered.
pub fn extract_structured_reply(generated: &str) -> Result<StructuredReply, MalformedModelOutput> {
    let start = generated.rfind('{').ok_or(MalformedModelOutput::NoOpeningBrace)?;
    let end = generated.rfind('}').ok_or(MalformedModelOutput::NoClosingBrace)?;

    if start > end {
        return Err(MalformedModelOutput::EmptySpan);
    }

    let span = &generated[start..=end];

    serde_json::from_str(span).map_err(|e| MalformedModelOutput::InvalidJson(e.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedModelOutput {
    #[error("no '{{' in model output")]
    NoOpeningBrace,
    #[error("no '}}' in model output")]
    NoClosingBrace,
    #[error("last '{{' follows last '}}'")]
    EmptySpan,
    #[error("reply object is not valid: {0}")]
    InvalidJson(String),
}
