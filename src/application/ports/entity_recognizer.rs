use async_trait::async_trait;

use crate::domain::RecognizedEntity;

#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    async fn recognize(&self, text: &str) -> Result<Vec<RecognizedEntity>, EntityRecognitionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EntityRecognitionError {
    #[error("tokenization failed: {0}")]
    TokenizationFailed(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
}
