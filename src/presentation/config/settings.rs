use std::num::NonZeroUsize;

use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub scene_backend: SceneBackendSettings,
    pub emotion: EmotionSettings,
    pub chunking: ChunkingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SceneBackendSettings {
    pub base_url: String,
    pub model: String,
    pub timeout_seconds: u64,
    pub temperature: f32,
    pub top_p: f32,
    pub num_predict: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmotionSettings {
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub threshold: f64,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingSettings {
    pub pages_per_chunk: usize,
    pub chapter_words_per_chunk: usize,
    pub min_chunk_chars: usize,
    pub concurrency: usize,
}

impl ChunkingSettings {
    pub fn pages_per_chunk(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.pages_per_chunk).ok_or_else(|| {
            ConfigError::Message("chunking.pages_per_chunk must be at least 1".to_string())
        })
    }

    pub fn chapter_words_per_chunk(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.chapter_words_per_chunk).ok_or_else(|| {
            ConfigError::Message("chunking.chapter_words_per_chunk must be at least 1".to_string())
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Layers built-in defaults, `appsettings.<env>.toml` (optional) and `APP_*`
    /// environment variables, e.g. `APP_SCENE_BACKEND__MODEL=llama3.1`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let settings: Settings = Self::with_defaults(Config::builder())?
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Built-in defaults only, ignoring files and environment.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::with_defaults(Config::builder())?
            .build()?
            .try_deserialize()
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000_i64)?
            .set_default("scene_backend.base_url", "http://localhost:11434")?
            .set_default("scene_backend.model", "deepseek-r1:1.5b")?
            .set_default("scene_backend.timeout_seconds", 30_i64)?
            .set_default("scene_backend.temperature", 0.1)?
            .set_default("scene_backend.top_p", 0.9)?
            .set_default("scene_backend.num_predict", 150_i64)?
            .set_default(
                "emotion.endpoint",
                "http://localhost:8080/models/tabularisai/multilingual-sentiment-analysis",
            )?
            .set_default("emotion.threshold", 0.1)?
            .set_default("emotion.timeout_seconds", 30_i64)?
            .set_default("chunking.pages_per_chunk", 3_i64)?
            .set_default("chunking.chapter_words_per_chunk", 500_i64)?
            .set_default("chunking.min_chunk_chars", 10_i64)?
            .set_default("chunking.concurrency", 4_i64)?
            .set_default("logging.level", "info,trilha=debug,tower_http=debug")?
            .set_default("logging.enable_json", false)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.chunking.pages_per_chunk()?;
        self.chunking.chapter_words_per_chunk()?;

        if !(0.0..=1.0).contains(&self.emotion.threshold) {
            return Err(ConfigError::Message(format!(
                "emotion.threshold must be within [0, 1], got {}",
                self.emotion.threshold
            )));
        }

        Ok(())
    }
}
