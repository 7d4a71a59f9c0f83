use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use trilha::application::services::{
    EmotionAnalyzer, EmotionAnalyzerOptions, EnvironmentDetector, SoundtrackService,
};
use trilha::infrastructure::llm::{HttpEmotionClassifier, OllamaClient};
use trilha::infrastructure::observability::{TracingConfig, init_tracing};
use trilha::infrastructure::text_processing::FixedSizeChunker;
use trilha::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(&TracingConfig::from_settings(
        &settings.logging,
        environment,
    ));

    let scene_backend = Arc::new(OllamaClient::from_settings(&settings.scene_backend)?);
    let classifier = Arc::new(HttpEmotionClassifier::from_settings(&settings.emotion)?);
    let splitter = Arc::new(FixedSizeChunker::new(
        settings.chunking.chapter_words_per_chunk()?,
    ));

    let emotion_analyzer = Arc::new(EmotionAnalyzer::new(
        classifier,
        splitter,
        EmotionAnalyzerOptions {
            threshold: settings.emotion.threshold,
            min_chunk_chars: settings.chunking.min_chunk_chars,
            call_timeout: Duration::from_secs(settings.emotion.timeout_seconds),
            concurrency: settings.chunking.concurrency,
        },
    ));

    let environment_detector = Arc::new(
        EnvironmentDetector::new(scene_backend)
            .with_timeout(Duration::from_secs(settings.scene_backend.timeout_seconds))
            .with_concurrency(settings.chunking.concurrency),
    );

    if !environment_detector.is_model_available().await {
        tracing::warn!(
            base_url = %settings.scene_backend.base_url,
            model = %settings.scene_backend.model,
            "Scene model not reachable at startup; environment detection will report errors"
        );
    }

    let soundtrack_service = Arc::new(SoundtrackService::new(
        Arc::clone(&emotion_analyzer),
        Arc::clone(&environment_detector),
        settings.chunking.pages_per_chunk()?,
        settings.chunking.concurrency,
    ));

    let state = AppState {
        soundtrack_service,
        emotion_analyzer,
        environment_detector,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!(%addr, environment = %environment, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
