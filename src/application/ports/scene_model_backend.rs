use async_trait::async_trait;

/// Local text-generation server used for scene classification.
#[async_trait]
pub trait SceneModelBackend: Send + Sync {
    /// Model the backend generates with.
    fn model(&self) -> &str;

    /// Names of the models registered on the server.
    async fn list_models(&self) -> Result<Vec<String>, SceneBackendError>;

    /// Single non-streaming completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, SceneBackendError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SceneBackendError {
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
