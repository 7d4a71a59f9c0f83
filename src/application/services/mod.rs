mod emotion_analyzer;
mod environment_detector;
mod soundtrack_service;

pub use emotion_analyzer::{
    ChapterAnalysis, ChapterDominantEmotion, ChapterEmotionReport, ChapterSummary,
    ChunkEmotionAnalysis, ChunkEmotionEntry, EmotionAnalyzer, EmotionAnalyzerOptions,
    aggregate_chapter,
};
pub use environment_detector::{EnvironmentDetector, build_prompt, parse_model_response};
pub use soundtrack_service::{ChunkReport, DocumentReport, SoundtrackService};
