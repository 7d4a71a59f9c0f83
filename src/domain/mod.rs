mod chunk;
mod emotion;
mod emotion_aggregate;
mod environment;
mod mood;
mod text;

pub use chunk::{Chunk, chunk_units, chunk_words};
pub use emotion::{DetectedEmotion, DominantEmotion, Emotion, LabelScore, mood_profile};
pub use emotion_aggregate::{AggregatedEmotion, EmotionStats, EmotionTally, dominant_aggregated};
pub use environment::{
    EnvironmentAnalysis, EnvironmentCategory, EnvironmentOutcome, SceneClassification,
    classify_by_keywords,
};
pub use mood::{MoodProfile, MoodRecommendation, Soundtrack, classify_mood, recommend_soundtrack};
pub use text::{normalize_for_matching, word_tokens};
