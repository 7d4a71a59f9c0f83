mod emotion_classifier;
mod scene_model_backend;
mod text_splitter;

pub use emotion_classifier::{EmotionClassifier, EmotionClassifierError};
pub use scene_model_backend::{SceneBackendError, SceneModelBackend};
pub use text_splitter::TextSplitter;
