use std::time::Duration;

use async_trait::async_trait;

use crate::domain::LabelScore;

/// Scores a text against every label the underlying model supports, unfiltered
/// and in the model's own output order.
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>, EmotionClassifierError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum EmotionClassifierError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("classification timed out after {0:?}")]
    Timeout(Duration),
}
