use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{SceneBackendError, SceneModelBackend};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::config::SceneBackendSettings;

/// Sampling options sent with every generate request.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GenerateOptions {
    pub temperature: f32,
    pub top_p: f32,
    pub num_predict: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            top_p: 0.9,
            num_predict: 150,
        }
    }
}

pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

impl OllamaClient {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(
        base_url: &str,
        model: &str,
        options: GenerateOptions,
        timeout: Duration,
    ) -> Result<Self, SceneBackendError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()
            .map_err(|e| SceneBackendError::Unreachable(format!("http client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            options,
        })
    }

    pub fn from_settings(settings: &SceneBackendSettings) -> Result<Self, SceneBackendError> {
        Self::new(
            &settings.base_url,
            &settings.model,
            GenerateOptions {
                temperature: settings.temperature,
                top_p: settings.top_p,
                num_predict: settings.num_predict,
            },
            Duration::from_secs(settings.timeout_seconds),
        )
    }
}

#[async_trait]
impl SceneModelBackend for OllamaClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn list_models(&self) -> Result<Vec<String>, SceneBackendError> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
            .map_err(|e| SceneBackendError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SceneBackendError::Unreachable(format!(
                "HTTP {} from /api/tags",
                response.status()
            )));
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| SceneBackendError::InvalidResponse(e.to_string()))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    async fn generate(&self, prompt: &str) -> Result<String, SceneBackendError> {
        tracing::debug!(model = %self.model, prompt = %sanitize_prompt(prompt), "Sending generate request");

        let request_body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: self.options,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| SceneBackendError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SceneBackendError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| SceneBackendError::InvalidResponse(e.to_string()))?;

        tracing::debug!(response = %sanitize_prompt(&generated.response), "Generate response received");

        Ok(generated.response)
    }
}
