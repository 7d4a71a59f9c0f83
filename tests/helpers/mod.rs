#![allow(dead_code)]

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use trilha::application::services::{
    EmotionAnalyzer, EmotionAnalyzerOptions, EnvironmentDetector, SoundtrackService,
};
use trilha::infrastructure::llm::{MockEmotionClassifier, MockSceneBackend};
use trilha::infrastructure::text_processing::FixedSizeChunker;
use trilha::presentation::{AppState, create_router};

pub const TEST_MODEL: &str = "deepseek-r1:1.5b";
pub const TEST_WORDS_PER_CHUNK: usize = 500;
pub const TEST_PAGES_PER_CHUNK: usize = 3;

pub const GARDEN_ANSWER: &str =
    r#"{"category": "garden", "confidence": 0.85, "elements": ["flores", "jardim"]}"#;

pub fn non_zero(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).expect("group size must be non-zero")
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub fn test_options() -> EmotionAnalyzerOptions {
    EmotionAnalyzerOptions {
        call_timeout: Duration::from_secs(5),
        ..EmotionAnalyzerOptions::default()
    }
}

pub fn analyzer(classifier: Arc<MockEmotionClassifier>) -> Arc<EmotionAnalyzer> {
    Arc::new(EmotionAnalyzer::new(
        classifier,
        Arc::new(FixedSizeChunker::new(non_zero(TEST_WORDS_PER_CHUNK))),
        test_options(),
    ))
}

pub fn detector(backend: Arc<MockSceneBackend>) -> Arc<EnvironmentDetector> {
    Arc::new(EnvironmentDetector::new(backend).with_timeout(Duration::from_secs(5)))
}

pub fn soundtrack_service(
    classifier: Arc<MockEmotionClassifier>,
    backend: Arc<MockSceneBackend>,
) -> SoundtrackService {
    SoundtrackService::new(
        analyzer(classifier),
        detector(backend),
        non_zero(TEST_PAGES_PER_CHUNK),
        4,
    )
}

pub fn test_app(classifier: MockEmotionClassifier, backend: MockSceneBackend) -> axum::Router {
    let emotion_analyzer = analyzer(Arc::new(classifier));
    let environment_detector = detector(Arc::new(backend));

    let soundtrack_service = Arc::new(SoundtrackService::new(
        Arc::clone(&emotion_analyzer),
        Arc::clone(&environment_detector),
        non_zero(TEST_PAGES_PER_CHUNK),
        4,
    ));

    create_router(AppState {
        soundtrack_service,
        emotion_analyzer,
        environment_detector,
    })
}
