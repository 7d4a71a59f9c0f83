use std::sync::Arc;

use crate::application::services::{EmotionAnalyzer, EnvironmentDetector, SoundtrackService};

#[derive(Clone)]
pub struct AppState {
    pub soundtrack_service: Arc<SoundtrackService>,
    pub emotion_analyzer: Arc<EmotionAnalyzer>,
    pub environment_detector: Arc<EnvironmentDetector>,
}
