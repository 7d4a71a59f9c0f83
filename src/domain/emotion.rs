use serde::{Deserialize, Serialize};

use super::mood::{MoodProfile, Soundtrack};

/// Every label the supported classifiers emit: the five-level multilingual
/// sentiment scale plus the GoEmotions taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emotion {
    VeryPositive,
    Positive,
    Neutral,
    Negative,
    VeryNegative,
    Joy,
    Love,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Disgust,
    Excitement,
    Admiration,
    Curiosity,
    Confusion,
    Nervousness,
    Pride,
    Embarrassment,
    Disappointment,
    Relief,
    Gratitude,
    Grief,
    Desire,
    Optimism,
    Annoyance,
    Remorse,
    Disapproval,
    Amusement,
    Caring,
}

impl Emotion {
    pub const ALL: [Emotion; 30] = [
        Emotion::VeryPositive,
        Emotion::Positive,
        Emotion::Neutral,
        Emotion::Negative,
        Emotion::VeryNegative,
        Emotion::Joy,
        Emotion::Love,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Surprise,
        Emotion::Disgust,
        Emotion::Excitement,
        Emotion::Admiration,
        Emotion::Curiosity,
        Emotion::Confusion,
        Emotion::Nervousness,
        Emotion::Pride,
        Emotion::Embarrassment,
        Emotion::Disappointment,
        Emotion::Relief,
        Emotion::Gratitude,
        Emotion::Grief,
        Emotion::Desire,
        Emotion::Optimism,
        Emotion::Annoyance,
        Emotion::Remorse,
        Emotion::Disapproval,
        Emotion::Amusement,
        Emotion::Caring,
    ];

    /// Case-insensitive parse of a classifier label.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        Self::ALL.into_iter().find(|e| e.label() == normalized)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryPositive => "very positive",
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
            Self::VeryNegative => "very negative",
            Self::Joy => "joy",
            Self::Love => "love",
            Self::Sadness => "sadness",
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Surprise => "surprise",
            Self::Disgust => "disgust",
            Self::Excitement => "excitement",
            Self::Admiration => "admiration",
            Self::Curiosity => "curiosity",
            Self::Confusion => "confusion",
            Self::Nervousness => "nervousness",
            Self::Pride => "pride",
            Self::Embarrassment => "embarrassment",
            Self::Disappointment => "disappointment",
            Self::Relief => "relief",
            Self::Gratitude => "gratitude",
            Self::Grief => "grief",
            Self::Desire => "desire",
            Self::Optimism => "optimism",
            Self::Annoyance => "annoyance",
            Self::Remorse => "remorse",
            Self::Disapproval => "disapproval",
            Self::Amusement => "amusement",
            Self::Caring => "caring",
        }
    }

    pub fn mood_profile(&self) -> MoodProfile {
        use Soundtrack::*;

        let (soundtrack, energy, valence) = match self {
            Self::VeryPositive => (Alegre, 0.9, 0.9),
            Self::Positive => (Otimista, 0.7, 0.7),
            Self::Neutral => (Ambiente, 0.5, 0.5),
            Self::Negative => (Melancolica, 0.3, 0.3),
            Self::VeryNegative => (Sombria, 0.1, 0.1),
            Self::Joy => (Alegre, 0.8, 0.8),
            Self::Love => (Romantica, 0.6, 0.9),
            Self::Sadness => (Melancolica, 0.2, 0.2),
            Self::Anger => (Intensa, 0.9, 0.1),
            Self::Fear => (Suspense, 0.7, 0.2),
            Self::Surprise => (Dramatica, 0.8, 0.6),
            Self::Disgust => (Sombria, 0.4, 0.1),
            Self::Excitement => (Energetica, 0.9, 0.8),
            Self::Admiration => (Inspiradora, 0.6, 0.8),
            Self::Curiosity => (Misteriosa, 0.7, 0.6),
            Self::Confusion => (Incerta, 0.4, 0.4),
            Self::Nervousness => (Tensa, 0.6, 0.3),
            Self::Pride => (Epica, 0.8, 0.8),
            Self::Embarrassment => (Suave, 0.3, 0.4),
            Self::Disappointment => (Triste, 0.2, 0.2),
            Self::Relief => (Calma, 0.4, 0.7),
            Self::Gratitude => (Harmoniosa, 0.5, 0.8),
            Self::Grief => (Lamentosa, 0.2, 0.1),
            Self::Desire => (Sedutora, 0.7, 0.7),
            Self::Optimism => (Esperancosa, 0.7, 0.8),
            Self::Annoyance => (Irritante, 0.6, 0.2),
            Self::Remorse => (Arrependida, 0.3, 0.2),
            Self::Disapproval => (Desaprovadora, 0.5, 0.3),
            Self::Amusement => (Divertida, 0.8, 0.8),
            Self::Caring => (Carinhosa, 0.5, 0.8),
        };

        MoodProfile::new(soundtrack, energy, valence)
    }
}

/// Profile for an arbitrary classifier label. Never fails: unknown labels get
/// [`MoodProfile::NEUTRAL`].
pub fn mood_profile(label: &str) -> MoodProfile {
    Emotion::from_label(label)
        .map(|emotion| emotion.mood_profile())
        .unwrap_or(MoodProfile::NEUTRAL)
}

/// One `(label, score)` pair as returned by an emotion classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedEmotion {
    pub score: f64,
    pub profile: MoodProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DominantEmotion {
    pub label: String,
    pub confidence: f64,
    pub soundtrack: Soundtrack,
    pub energy: f64,
    pub valence: f64,
}

impl DominantEmotion {
    pub fn from_detected(label: &str, detected: &DetectedEmotion) -> Self {
        Self {
            label: label.to_string(),
            confidence: detected.score,
            soundtrack: detected.profile.soundtrack,
            energy: detected.profile.energy,
            valence: detected.profile.valence,
        }
    }

    /// Reported when classification failed for a chunk.
    pub fn neutral_fallback() -> Self {
        let profile = Emotion::Neutral.mood_profile();
        Self {
            label: Emotion::Neutral.label().to_string(),
            confidence: 0.5,
            soundtrack: profile.soundtrack,
            energy: profile.energy,
            valence: profile.valence,
        }
    }
}
