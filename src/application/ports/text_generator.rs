use async_trait::async_trait;

/// A causal language model together with its tokenizer.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Continues `prompt` and returns only the newly generated text, with
    /// special control tokens removed.
    async fn generate(
        &self,
        prompt: &str,
        max_new_tokens: usize,
    ) -> Result<String, TextGenerationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TextGenerationError {
    #[error("tokenization failed: {0}")]
    TokenizationFailed(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
