use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{EmotionClassifier, EmotionClassifierError};
use crate::domain::LabelScore;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::config::EmotionSettings;

/// Text-classification endpoint speaking the Hugging Face inference format.
pub struct HttpEmotionClassifier {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

/// Single inputs come back either flat or wrapped in a one-element batch.
#[derive(Deserialize)]
#[serde(untagged)]
enum ClassificationPayload {
    Batched(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl HttpEmotionClassifier {
    pub fn new(
        endpoint: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, EmotionClassifierError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()
            .map_err(|e| EmotionClassifierError::ApiRequestFailed(format!("http client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    pub fn from_settings(settings: &EmotionSettings) -> Result<Self, EmotionClassifierError> {
        Self::new(
            &settings.endpoint,
            settings.api_key.clone(),
            Duration::from_secs(settings.timeout_seconds),
        )
    }
}

#[async_trait]
impl EmotionClassifier for HttpEmotionClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>, EmotionClassifierError> {
        tracing::debug!(text = %sanitize_prompt(text), "Sending classification request");

        let body = serde_json::json!({
            "inputs": text,
            "parameters": { "top_k": null },
        });

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| EmotionClassifierError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmotionClassifierError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let payload: ClassificationPayload = response
            .json()
            .await
            .map_err(|e| EmotionClassifierError::InvalidResponse(e.to_string()))?;

        match payload {
            ClassificationPayload::Flat(scores) => Ok(scores),
            ClassificationPayload::Batched(batches) => batches
                .into_iter()
                .next()
                .ok_or_else(|| EmotionClassifierError::InvalidResponse("empty batch".to_string())),
        }
    }
}
