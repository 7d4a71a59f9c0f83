mod http_emotion_classifier;
mod mock_emotion_classifier;
mod mock_scene_backend;
mod ollama_client;

pub use http_emotion_classifier::HttpEmotionClassifier;
pub use mock_emotion_classifier::MockEmotionClassifier;
pub use mock_scene_backend::MockSceneBackend;
pub use ollama_client::{GenerateOptions, OllamaClient};
