use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use super::emotion_aggregate::AggregatedEmotion;

/// Soundtrack style a mood maps to. Serialized with the names the music catalog uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Soundtrack {
    Alegre,
    Otimista,
    Ambiente,
    #[serde(rename = "melancólica")]
    Melancolica,
    Sombria,
    #[serde(rename = "romântica")]
    Romantica,
    Intensa,
    Suspense,
    #[serde(rename = "dramática")]
    Dramatica,
    #[serde(rename = "energética")]
    Energetica,
    Inspiradora,
    Misteriosa,
    Incerta,
    Tensa,
    #[serde(rename = "épica")]
    Epica,
    Suave,
    Triste,
    Calma,
    Harmoniosa,
    Lamentosa,
    Sedutora,
    #[serde(rename = "esperançosa")]
    Esperancosa,
    Irritante,
    Arrependida,
    Desaprovadora,
    Divertida,
    Carinhosa,
}

impl Soundtrack {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alegre => "alegre",
            Self::Otimista => "otimista",
            Self::Ambiente => "ambiente",
            Self::Melancolica => "melancólica",
            Self::Sombria => "sombria",
            Self::Romantica => "romântica",
            Self::Intensa => "intensa",
            Self::Suspense => "suspense",
            Self::Dramatica => "dramática",
            Self::Energetica => "energética",
            Self::Inspiradora => "inspiradora",
            Self::Misteriosa => "misteriosa",
            Self::Incerta => "incerta",
            Self::Tensa => "tensa",
            Self::Epica => "épica",
            Self::Suave => "suave",
            Self::Triste => "triste",
            Self::Calma => "calma",
            Self::Harmoniosa => "harmoniosa",
            Self::Lamentosa => "lamentosa",
            Self::Sedutora => "sedutora",
            Self::Esperancosa => "esperançosa",
            Self::Irritante => "irritante",
            Self::Arrependida => "arrependida",
            Self::Desaprovadora => "desaprovadora",
            Self::Divertida => "divertida",
            Self::Carinhosa => "carinhosa",
        }
    }
}

impl fmt::Display for Soundtrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static soundtrack descriptor. Energy and valence are always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoodProfile {
    pub soundtrack: Soundtrack,
    pub energy: f64,
    pub valence: f64,
}

impl MoodProfile {
    /// Profile used for any label the lookup table does not know.
    pub const NEUTRAL: MoodProfile = MoodProfile::new(Soundtrack::Ambiente, 0.5, 0.5);

    pub const fn new(soundtrack: Soundtrack, energy: f64, valence: f64) -> Self {
        Self {
            soundtrack,
            energy,
            valence,
        }
    }
}

impl Default for MoodProfile {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodRecommendation {
    pub soundtrack: Soundtrack,
    pub energy: f64,
    pub valence: f64,
    pub description: String,
}

/// Buckets an energy/valence pair. Rules are evaluated in order and every
/// comparison is strict, so a value sitting on a threshold falls through.
pub fn classify_mood(energy: f64, valence: f64) -> Soundtrack {
    if energy > 0.7 && valence > 0.7 {
        Soundtrack::Alegre
    } else if energy > 0.7 && valence < 0.3 {
        Soundtrack::Intensa
    } else if energy < 0.3 && valence < 0.3 {
        Soundtrack::Melancolica
    } else if energy < 0.3 && valence > 0.7 {
        Soundtrack::Calma
    } else if valence > 0.6 {
        Soundtrack::Otimista
    } else if valence < 0.4 {
        Soundtrack::Sombria
    } else {
        Soundtrack::Ambiente
    }
}

/// Weighted-average energy and valence over every aggregated label, weighting each
/// label by `mean_score * frequency`, then bucketed with [`classify_mood`].
pub fn recommend_soundtrack(aggregated: &IndexMap<String, AggregatedEmotion>) -> MoodRecommendation {
    let (energy_sum, valence_sum, total_weight) = aggregated.values().fold(
        (0.0, 0.0, 0.0),
        |(energy, valence, weight), emotion| {
            let w = emotion.weight();
            (
                energy + emotion.profile.energy * w,
                valence + emotion.profile.valence * w,
                weight + w,
            )
        },
    );

    let (energy, valence) = if total_weight > 0.0 {
        (energy_sum / total_weight, valence_sum / total_weight)
    } else {
        (0.5, 0.5)
    };

    let soundtrack = classify_mood(energy, valence);

    MoodRecommendation {
        soundtrack,
        energy: round2(energy),
        valence: round2(valence),
        description: format!(
            "{soundtrack} soundtrack with energy {energy:.1} and valence {valence:.1}"
        ),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(0.666_666), 0.67);
        assert_eq!(round2(0.5), 0.5);
    }

    #[test]
    fn serialized_names_match_display() {
        for soundtrack in [Soundtrack::Melancolica, Soundtrack::Epica, Soundtrack::Alegre] {
            let json = serde_json::to_string(&soundtrack).unwrap();
            assert_eq!(json, format!("\"{}\"", soundtrack.as_str()));
        }
    }
}
