mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ChunkingSettings, EmotionSettings, LoggingSettings, SceneBackendSettings, ServerSettings,
    Settings,
};
