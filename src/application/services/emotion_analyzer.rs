use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use indexmap::IndexMap;
use serde::Serialize;

use crate::application::ports::{EmotionClassifier, EmotionClassifierError, TextSplitter};
use crate::domain::{
    AggregatedEmotion, Chunk, DetectedEmotion, DominantEmotion, EmotionTally, LabelScore,
    MoodRecommendation, Soundtrack, dominant_aggregated, mood_profile, recommend_soundtrack,
};

#[derive(Debug, Clone)]
pub struct EmotionAnalyzerOptions {
    /// Minimum score for a label to be retained.
    pub threshold: f64,
    /// Chunks whose trimmed text is shorter than this are skipped in chapter analysis.
    pub min_chunk_chars: usize,
    pub call_timeout: Duration,
    /// Upper bound on classifier calls in flight for one chapter.
    pub concurrency: usize,
}

impl Default for EmotionAnalyzerOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            min_chunk_chars: 10,
            call_timeout: Duration::from_secs(30),
            concurrency: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkEmotionAnalysis {
    pub text: String,
    pub detected: IndexMap<String, DetectedEmotion>,
    /// `None` when no label cleared the threshold.
    pub dominant: Option<DominantEmotion>,
    pub total_emotions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChunkEmotionAnalysis {
    fn failed(text: &str, error: String) -> Self {
        Self {
            text: text.to_string(),
            detected: IndexMap::new(),
            dominant: Some(DominantEmotion::neutral_fallback()),
            total_emotions: 0,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkEmotionEntry {
    pub chunk_id: usize,
    pub analysis: ChunkEmotionAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterDominantEmotion {
    pub label: String,
    pub mean_score: f64,
    pub frequency: usize,
    pub soundtrack: Soundtrack,
    pub energy: f64,
    pub valence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterSummary {
    pub total_chunks: usize,
    pub analyzed_chunks: usize,
    pub dominant: ChapterDominantEmotion,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterEmotionReport {
    pub summary: ChapterSummary,
    pub aggregated: IndexMap<String, AggregatedEmotion>,
    pub chunk_analyses: Vec<ChunkEmotionEntry>,
    pub recommendation: MoodRecommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChapterAnalysis {
    Detected(ChapterEmotionReport),
    /// No label cleared the threshold in any analysed chunk.
    NothingDetected {
        total_chunks: usize,
        analyzed_chunks: usize,
        chunk_analyses: Vec<ChunkEmotionEntry>,
    },
}

impl ChapterAnalysis {
    pub fn report(&self) -> Option<&ChapterEmotionReport> {
        match self {
            Self::Detected(report) => Some(report),
            Self::NothingDetected { .. } => None,
        }
    }
}

pub struct EmotionAnalyzer {
    classifier: Arc<dyn EmotionClassifier>,
    splitter: Arc<dyn TextSplitter>,
    options: EmotionAnalyzerOptions,
}

impl EmotionAnalyzer {
    pub fn new(
        classifier: Arc<dyn EmotionClassifier>,
        splitter: Arc<dyn TextSplitter>,
        options: EmotionAnalyzerOptions,
    ) -> Self {
        Self {
            classifier,
            splitter,
            options,
        }
    }

    pub fn options(&self) -> &EmotionAnalyzerOptions {
        &self.options
    }

    pub async fn analyze_chunk(&self, text: &str) -> ChunkEmotionAnalysis {
        self.analyze_chunk_with_threshold(text, self.options.threshold)
            .await
    }

    /// Classifies one chunk. Never fails: classifier errors and timeouts produce an
    /// error-tagged analysis whose dominant emotion is forced to neutral.
    #[tracing::instrument(skip(self, text), fields(text_chars = text.chars().count()))]
    pub async fn analyze_chunk_with_threshold(
        &self,
        text: &str,
        threshold: f64,
    ) -> ChunkEmotionAnalysis {
        if text.trim().is_empty() {
            return ChunkEmotionAnalysis::failed(text, "empty text".to_string());
        }

        let scores = match self.classify_bounded(text).await {
            Ok(scores) => scores,
            Err(e) => {
                tracing::error!(error = %e, "Emotion classification failed");
                return ChunkEmotionAnalysis::failed(text, e.to_string());
            }
        };

        let mut detected: IndexMap<String, DetectedEmotion> = IndexMap::new();
        for entry in scores.into_iter().filter(|s| s.score >= threshold) {
            let label = entry.label.trim().to_lowercase();
            if detected.contains_key(&label) {
                continue;
            }
            let profile = mood_profile(&label);
            detected.insert(
                label,
                DetectedEmotion {
                    score: entry.score,
                    profile,
                },
            );
        }

        // Strict comparison keeps the first label in classifier order on ties.
        let dominant = detected
            .iter()
            .fold(None::<(&String, &DetectedEmotion)>, |best, (label, emotion)| {
                match best {
                    Some((_, current)) if emotion.score <= current.score => best,
                    _ => Some((label, emotion)),
                }
            })
            .map(|(label, emotion)| DominantEmotion::from_detected(label, emotion));

        tracing::debug!(
            retained = detected.len(),
            dominant = dominant.as_ref().map(|d| d.label.as_str()),
            "Chunk classified"
        );

        ChunkEmotionAnalysis {
            text: text.to_string(),
            total_emotions: detected.len(),
            detected,
            dominant,
            error: None,
        }
    }

    /// Chapter-level analysis. Without pre-split `chunks` the text is split by the
    /// configured splitter.
    #[tracing::instrument(skip(self, text, chunks), fields(text_chars = text.chars().count()))]
    pub async fn analyze_chapter(&self, text: &str, chunks: Option<&[String]>) -> ChapterAnalysis {
        let chunks: Vec<Chunk> = match chunks {
            Some(chunks) if !chunks.is_empty() => chunks
                .iter()
                .enumerate()
                .map(|(index, text)| Chunk::new(index, text.clone()))
                .collect(),
            _ => self.splitter.split(text),
        };

        let total_chunks = chunks.len();
        let entries = self.analyze_chunks(chunks).await;

        aggregate_chapter(total_chunks, entries)
    }

    /// Analyses the substantive chunks concurrently; entries come back in chunk order.
    pub async fn analyze_chunks(&self, chunks: Vec<Chunk>) -> Vec<ChunkEmotionEntry> {
        let min_chars = self.options.min_chunk_chars;

        stream::iter(
            chunks
                .into_iter()
                .filter(move |chunk| chunk.is_substantive(min_chars)),
        )
        .map(|chunk| async move {
            let analysis = self.analyze_chunk(&chunk.text).await;
            ChunkEmotionEntry {
                chunk_id: chunk.index,
                analysis,
            }
        })
        .buffered(self.options.concurrency.max(1))
        .collect()
        .await
    }

    async fn classify_bounded(
        &self,
        text: &str,
    ) -> Result<Vec<LabelScore>, EmotionClassifierError> {
        let timeout = self.options.call_timeout;
        tokio::time::timeout(timeout, self.classifier.classify(text))
            .await
            .unwrap_or(Err(EmotionClassifierError::Timeout(timeout)))
    }
}

/// Folds per-chunk analyses into chapter statistics. Entries must be in chunk order
/// so that first-seen tie-breaks follow the document.
pub fn aggregate_chapter(total_chunks: usize, entries: Vec<ChunkEmotionEntry>) -> ChapterAnalysis {
    let mut tally = EmotionTally::default();
    for entry in &entries {
        for (label, emotion) in &entry.analysis.detected {
            tally.record(label, emotion.score);
        }
    }

    let aggregated = tally.aggregate();
    let analyzed_chunks = entries.len();

    let dominant = match dominant_aggregated(&aggregated) {
        Some((label, emotion)) => ChapterDominantEmotion {
            label: label.clone(),
            mean_score: emotion.mean_score,
            frequency: emotion.frequency,
            soundtrack: emotion.profile.soundtrack,
            energy: emotion.profile.energy,
            valence: emotion.profile.valence,
        },
        None => {
            tracing::info!(total_chunks, analyzed_chunks, "No emotion detected in chapter");
            return ChapterAnalysis::NothingDetected {
                total_chunks,
                analyzed_chunks,
                chunk_analyses: entries,
            };
        }
    };

    let recommendation = recommend_soundtrack(&aggregated);

    tracing::info!(
        total_chunks,
        analyzed_chunks,
        dominant = %dominant.label,
        soundtrack = %recommendation.soundtrack,
        "Chapter emotion analysis complete"
    );

    ChapterAnalysis::Detected(ChapterEmotionReport {
        summary: ChapterSummary {
            total_chunks,
            analyzed_chunks,
            dominant,
        },
        aggregated,
        chunk_analyses: entries,
        recommendation,
    })
}
