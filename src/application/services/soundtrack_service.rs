use std::num::NonZeroUsize;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::domain::{Chunk, EnvironmentAnalysis, chunk_units, word_tokens};

use super::emotion_analyzer::{
    ChapterAnalysis, ChunkEmotionAnalysis, ChunkEmotionEntry, EmotionAnalyzer, aggregate_chapter,
};
use super::environment_detector::EnvironmentDetector;

#[derive(Debug, Clone, Serialize)]
pub struct ChunkReport {
    pub index: usize,
    pub environment: EnvironmentAnalysis,
    /// `None` for chunks too short to classify.
    pub emotion: Option<ChunkEmotionAnalysis>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub total_chunks: usize,
    pub sample_chunk: Option<String>,
    pub sample_tokens: Vec<String>,
    pub chunks: Vec<ChunkReport>,
    pub chapter: ChapterAnalysis,
}

/// Runs a whole document through chunking, scene detection and emotion
/// aggregation.
pub struct SoundtrackService {
    emotion_analyzer: Arc<EmotionAnalyzer>,
    environment_detector: Arc<EnvironmentDetector>,
    pages_per_chunk: NonZeroUsize,
    concurrency: usize,
}

impl SoundtrackService {
    pub fn new(
        emotion_analyzer: Arc<EmotionAnalyzer>,
        environment_detector: Arc<EnvironmentDetector>,
        pages_per_chunk: NonZeroUsize,
        concurrency: usize,
    ) -> Self {
        Self {
            emotion_analyzer,
            environment_detector,
            pages_per_chunk,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn analyze_document(&self, pages: &[String]) -> DocumentReport {
        self.analyze_document_with(pages, self.pages_per_chunk)
            .await
    }

    #[tracing::instrument(skip(self, pages), fields(page_count = pages.len()))]
    pub async fn analyze_document_with(
        &self,
        pages: &[String],
        pages_per_chunk: NonZeroUsize,
    ) -> DocumentReport {
        let chunks = chunk_units(pages, pages_per_chunk);
        let total_chunks = chunks.len();
        tracing::info!(total_chunks, "Document chunked");

        let sample_chunk = chunks.first().map(|c| c.text.clone());
        let sample_tokens = sample_chunk
            .as_deref()
            .map(word_tokens)
            .unwrap_or_default();

        let min_chars = self.emotion_analyzer.options().min_chunk_chars;

        let reports: Vec<ChunkReport> = stream::iter(chunks)
            .map(|chunk| self.analyze_chunk(chunk, min_chars))
            .buffered(self.concurrency)
            .collect()
            .await;

        let entries: Vec<ChunkEmotionEntry> = reports
            .iter()
            .filter_map(|report| {
                report.emotion.clone().map(|analysis| ChunkEmotionEntry {
                    chunk_id: report.index,
                    analysis,
                })
            })
            .collect();

        let chapter = aggregate_chapter(total_chunks, entries);

        DocumentReport {
            total_chunks,
            sample_chunk,
            sample_tokens,
            chunks: reports,
            chapter,
        }
    }

    async fn analyze_chunk(&self, chunk: Chunk, min_chars: usize) -> ChunkReport {
        let emotion = async {
            if chunk.is_substantive(min_chars) {
                Some(self.emotion_analyzer.analyze_chunk(&chunk.text).await)
            } else {
                None
            }
        };

        let (environment, emotion) =
            tokio::join!(self.environment_detector.detect(&chunk.text), emotion);

        ChunkReport {
            index: chunk.index,
            environment,
            emotion,
        }
    }
}
