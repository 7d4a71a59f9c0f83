use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::emotion::mood_profile;
use super::mood::MoodProfile;

/// Chapter-level statistics for one label. `mean_score * frequency` is the sum of
/// every retained score for that label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedEmotion {
    pub mean_score: f64,
    pub frequency: usize,
    pub max_score: f64,
    pub profile: MoodProfile,
}

impl AggregatedEmotion {
    /// Returns `None` for an empty score list.
    pub fn from_scores(label: &str, scores: &[f64]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }

        let sum: f64 = scores.iter().sum();
        let max_score = scores.iter().copied().fold(f64::MIN, f64::max);

        Some(Self {
            mean_score: sum / scores.len() as f64,
            frequency: scores.len(),
            max_score,
            profile: mood_profile(label),
        })
    }

    pub fn from_stats(label: &str, stats: &EmotionStats) -> Self {
        Self {
            mean_score: stats.mean_score,
            frequency: stats.frequency,
            max_score: stats.max_score,
            profile: mood_profile(label),
        }
    }

    /// Rewards both strength and persistence.
    pub fn weight(&self) -> f64 {
        self.mean_score * self.frequency as f64
    }
}

/// Precomputed statistics supplied by callers that already aggregated elsewhere.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmotionStats {
    pub mean_score: f64,
    pub frequency: usize,
    #[serde(default)]
    pub max_score: f64,
}

/// Accumulates retained scores per label, keeping labels in first-seen order.
#[derive(Debug, Default, Clone)]
pub struct EmotionTally {
    scores: IndexMap<String, Vec<f64>>,
}

impl EmotionTally {
    pub fn record(&mut self, label: &str, score: f64) {
        self.scores
            .entry(label.to_string())
            .or_default()
            .push(score);
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn aggregate(&self) -> IndexMap<String, AggregatedEmotion> {
        self.scores
            .iter()
            .filter_map(|(label, scores)| {
                AggregatedEmotion::from_scores(label, scores).map(|agg| (label.clone(), agg))
            })
            .collect()
    }
}

/// Label with the highest `mean_score * frequency`. Ties keep the label seen first.
pub fn dominant_aggregated(
    aggregated: &IndexMap<String, AggregatedEmotion>,
) -> Option<(&String, &AggregatedEmotion)> {
    aggregated.iter().fold(None, |best, (label, emotion)| match best {
        Some((_, current)) if emotion.weight() <= current.weight() => best,
        _ => Some((label, emotion)),
    })
}
