mod analyze;
mod emotion;
mod environment;
mod error;
mod health;
mod recommend;

pub use analyze::{
    ChapterRequest, DocumentRequest, analyze_chapter_handler, analyze_document_handler,
};
pub use emotion::{EmotionRequest, analyze_emotion_handler};
pub use environment::{EnvironmentRequest, analyze_environment_handler};
pub use error::ErrorResponse;
pub use health::{HealthResponse, health_handler};
pub use recommend::{RecommendRequest, recommend_handler};
