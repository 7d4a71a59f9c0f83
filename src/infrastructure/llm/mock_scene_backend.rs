use std::sync::Mutex;

use crate::application::ports::{SceneBackendError, SceneModelBackend};

/// In-memory scene backend with a fixed model list and canned generation output.
pub struct MockSceneBackend {
    model: String,
    models: Result<Vec<String>, SceneBackendError>,
    generation: Result<String, SceneBackendError>,
    prompts: Mutex<Vec<String>>,
}

impl MockSceneBackend {
    /// Backend that has `model` registered and answers every prompt with `response`.
    pub fn answering(model: &str, response: &str) -> Self {
        Self {
            model: model.to_string(),
            models: Ok(vec![model.to_string()]),
            generation: Ok(response.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable(model: &str) -> Self {
        Self {
            model: model.to_string(),
            models: Err(SceneBackendError::Unreachable(
                "connection refused".to_string(),
            )),
            generation: Err(SceneBackendError::Unreachable(
                "connection refused".to_string(),
            )),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_models(mut self, models: &[&str]) -> Self {
        self.models = Ok(models.iter().map(|m| m.to_string()).collect());
        self
    }

    pub fn with_generation_error(mut self, error: SceneBackendError) -> Self {
        self.generation = Err(error);
        self
    }

    /// Prompts received by `generate`, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl SceneModelBackend for MockSceneBackend {
    fn model(&self) -> &str {
        &self.model
    }

    async fn list_models(&self) -> Result<Vec<String>, SceneBackendError> {
        self.models.clone()
    }

    async fn generate(&self, prompt: &str) -> Result<String, SceneBackendError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.generation.clone()
    }
}
