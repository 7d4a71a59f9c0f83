use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{EmotionClassifier, EmotionClassifierError};
use crate::domain::LabelScore;

/// Scripted classifier. The first registered fragment contained in the input text
/// decides the response; anything else gets the fallback scores.
#[derive(Default)]
pub struct MockEmotionClassifier {
    responses: Vec<(String, Result<Vec<LabelScore>, EmotionClassifierError>)>,
    fallback: Vec<LabelScore>,
    calls: AtomicUsize,
}

impl MockEmotionClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, fragment: &str, scores: &[(&str, f64)]) -> Self {
        let scores = scores
            .iter()
            .map(|(label, score)| LabelScore::new(*label, *score))
            .collect();
        self.responses.push((fragment.to_string(), Ok(scores)));
        self
    }

    pub fn with_failure(mut self, fragment: &str, error: EmotionClassifierError) -> Self {
        self.responses.push((fragment.to_string(), Err(error)));
        self
    }

    pub fn with_fallback(mut self, scores: &[(&str, f64)]) -> Self {
        self.fallback = scores
            .iter()
            .map(|(label, score)| LabelScore::new(*label, *score))
            .collect();
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl EmotionClassifier for MockEmotionClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>, EmotionClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        self.responses
            .iter()
            .find(|(fragment, _)| text.contains(fragment.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}
