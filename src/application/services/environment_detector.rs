use std::future::Future;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use futures::stream::{self, StreamExt};
use regex::Regex;
use serde::Deserialize;

use crate::application::ports::{SceneBackendError, SceneModelBackend};
use crate::domain::{
    EnvironmentAnalysis, EnvironmentCategory, EnvironmentOutcome, SceneClassification,
    classify_by_keywords,
};

static THINK_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").unwrap());
static JSON_OBJECT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

const DEFAULT_MODEL_CONFIDENCE: f64 = 0.5;

/// Classifies the scene a passage describes using a local text-generation model,
/// falling back to keyword scoring when the model answer is not usable.
pub struct EnvironmentDetector {
    backend: Arc<dyn SceneModelBackend>,
    call_timeout: Duration,
    concurrency: usize,
}

impl EnvironmentDetector {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(backend: Arc<dyn SceneModelBackend>) -> Self {
        Self {
            backend,
            call_timeout: Self::DEFAULT_TIMEOUT,
            concurrency: 4,
        }
    }

    pub fn with_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn is_backend_available(&self) -> bool {
        self.bounded(self.backend.list_models()).await.is_ok()
    }

    pub async fn is_model_available(&self) -> bool {
        match self.bounded(self.backend.list_models()).await {
            Ok(models) => model_is_listed(self.backend.model(), &models),
            Err(_) => false,
        }
    }

    /// Never fails: every failure is reported as an error-tagged analysis.
    #[tracing::instrument(skip(self, text), fields(text_chars = text.chars().count()))]
    pub async fn detect(&self, text: &str) -> EnvironmentAnalysis {
        let text = text.trim();
        if text.is_empty() {
            tracing::warn!("Environment detection requested for empty text");
            return EnvironmentAnalysis::error(text, "empty text");
        }

        let models = match self.bounded(self.backend.list_models()).await {
            Ok(models) => models,
            Err(e) => {
                tracing::warn!(error = %e, "Scene backend unavailable");
                return EnvironmentAnalysis::error(text, e.to_string());
            }
        };

        let model = self.backend.model();
        if !model_is_listed(model, &models) {
            tracing::warn!(model, available = ?models, "Scene model not registered on backend");
            return EnvironmentAnalysis::error(text, format!("model {model} not found"));
        }

        let raw_response = match self.bounded(self.backend.generate(&build_prompt(text))).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Scene generation failed");
                return EnvironmentAnalysis::error(text, format!("generation failed: {e}"));
            }
        };

        let outcome = match parse_model_response(&raw_response) {
            Some(classification) => EnvironmentOutcome::Remote {
                classification,
                raw_response,
            },
            None => {
                tracing::debug!("Model answer unusable, falling back to keyword heuristic");
                EnvironmentOutcome::Heuristic {
                    classification: classify_by_keywords(text, &raw_response),
                    raw_response,
                }
            }
        };

        tracing::info!(method = outcome.method(), "Environment detection complete");

        EnvironmentAnalysis::new(text, outcome)
    }

    /// Analyses every text independently; results keep the input order.
    pub async fn detect_many(&self, texts: &[String]) -> Vec<EnvironmentAnalysis> {
        stream::iter(texts)
            .map(|text| self.detect(text))
            .buffered(self.concurrency)
            .collect()
            .await
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, SceneBackendError>>,
    ) -> Result<T, SceneBackendError> {
        tokio::time::timeout(self.call_timeout, call)
            .await
            .unwrap_or_else(|_| {
                Err(SceneBackendError::Unreachable(format!(
                    "no answer within {} seconds",
                    self.call_timeout.as_secs()
                )))
            })
    }
}

fn model_is_listed(model: &str, available: &[String]) -> bool {
    available
        .iter()
        .any(|name| name == model || name.strip_suffix(":latest") == Some(model))
}

pub fn build_prompt(text: &str) -> String {
    let categories = EnvironmentCategory::ALL
        .iter()
        .enumerate()
        .map(|(i, category)| {
            format!(
                "{}. {} - {}",
                i + 1,
                category.as_str(),
                category.description()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Analise este texto e determine se descreve o ambiente de um local:\n\n\
         TEXTO: \"{text}\"\n\n\
         TAREFA: Classifique em exatamente uma destas categorias:\n\
         {categories}\n\n\
         RESPOSTA (apenas JSON):\n\
         {{\"category\": \"nome_da_categoria\", \"confidence\": 0.9, \"elements\": [\"elemento1\", \"elemento2\"]}}"
    )
}

#[derive(Deserialize)]
struct ModelAnswer {
    #[serde(alias = "categoria")]
    category: String,
    #[serde(default, alias = "confianca", alias = "confiança")]
    confidence: Option<serde_json::Value>,
    #[serde(default, alias = "elementos")]
    elements: Vec<String>,
}

/// Structured parse of a model answer. `None` means the heuristic must decide.
pub fn parse_model_response(raw: &str) -> Option<SceneClassification> {
    let visible = THINK_BLOCK.replace_all(raw, "");
    let object = JSON_OBJECT.find(&visible)?;
    let answer: ModelAnswer = serde_json::from_str(object.as_str()).ok()?;

    let category = EnvironmentCategory::from_label(&answer.category)?;
    let confidence = match answer.confidence {
        None => DEFAULT_MODEL_CONFIDENCE,
        Some(serde_json::Value::Number(n)) => n.as_f64()?,
        Some(serde_json::Value::String(s)) => s.trim().parse().ok()?,
        Some(_) => return None,
    };

    Some(SceneClassification {
        category,
        confidence: confidence.clamp(0.0, 1.0),
        elements: answer.elements,
    })
}
