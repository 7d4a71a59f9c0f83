use std::fmt;

use serde::{Serialize, Serializer};

use super::text::normalize_for_matching;

const TEXT_MATCH_WEIGHT: f64 = 1.0;
const RESPONSE_MATCH_WEIGHT: f64 = 0.5;
const CONFIDENCE_PER_POINT: f64 = 0.15;
const MAX_HEURISTIC_CONFIDENCE: f64 = 0.9;

/// Scene a passage can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentCategory {
    None,
    Garden,
    Domestic,
    Natural,
    Urban,
    Workplace,
    Rural,
    Aquatic,
}

impl EnvironmentCategory {
    pub const ALL: [EnvironmentCategory; 8] = [
        Self::None,
        Self::Garden,
        Self::Domestic,
        Self::Natural,
        Self::Urban,
        Self::Workplace,
        Self::Rural,
        Self::Aquatic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Garden => "garden",
            Self::Domestic => "domestic",
            Self::Natural => "natural",
            Self::Urban => "urban",
            Self::Workplace => "workplace",
            Self::Rural => "rural",
            Self::Aquatic => "aquatic",
        }
    }

    /// Portuguese description shown to the model in the prompt.
    pub fn description(&self) -> &'static str {
        match self {
            Self::None => "não descreve ambiente",
            Self::Garden => "jardim ou área verde",
            Self::Domestic => "ambiente interno doméstico",
            Self::Natural => "paisagem natural",
            Self::Urban => "ambiente urbano",
            Self::Workplace => "ambiente de trabalho",
            Self::Rural => "ambiente rural",
            Self::Aquatic => "ambiente aquático",
        }
    }

    fn portuguese_slug(&self) -> &'static str {
        match self {
            Self::None => "nao_ambiente",
            Self::Garden => "jardim",
            Self::Domestic => "domestico",
            Self::Natural => "natural",
            Self::Urban => "urbano",
            Self::Workplace => "trabalho",
            Self::Rural => "rural",
            Self::Aquatic => "aquatico",
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::None => &[],
            Self::Garden => &[
                "jardim", "flores", "árvores", "plantas", "verde", "parque", "gramado", "canteiro",
            ],
            Self::Domestic => &[
                "casa", "sala", "cozinha", "quarto", "sofá", "mesa", "cama", "banheiro",
            ],
            Self::Natural => &[
                "floresta",
                "montanha",
                "rio",
                "natureza",
                "selvagem",
                "mato",
                "campo aberto",
            ],
            Self::Urban => &[
                "cidade", "rua", "prédio", "urbano", "construção", "avenida", "calçada",
            ],
            Self::Workplace => &[
                "escritório",
                "trabalho",
                "empresa",
                "fábrica",
                "loja",
                "hospital",
            ],
            Self::Rural => &["fazenda", "campo", "rural", "agricultura", "plantação", "sítio"],
            Self::Aquatic => &["água", "mar", "lago", "rio", "piscina", "praia", "córrego"],
        }
    }

    /// Accepts the English slug, the Portuguese slug or the Portuguese description,
    /// case- and accent-form-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = normalize_for_matching(label);
        let normalized = normalized.trim_matches(|c: char| c == '"' || c == '.');
        Self::ALL.into_iter().find(|category| {
            normalized == category.as_str()
                || normalized == category.portuguese_slug()
                || normalized == normalize_for_matching(category.description())
        })
    }
}

impl fmt::Display for EnvironmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneClassification {
    pub category: EnvironmentCategory,
    pub confidence: f64,
    pub elements: Vec<String>,
}

impl SceneClassification {
    pub fn none() -> Self {
        Self {
            category: EnvironmentCategory::None,
            confidence: 0.0,
            elements: Vec::new(),
        }
    }
}

/// Keyword fallback used when the model output cannot be parsed.
///
/// Each keyword present in `text` adds 1.0 and each keyword present in
/// `raw_response` adds 0.5. The strictly highest category wins, so ties keep the
/// earlier category in [`EnvironmentCategory::ALL`] order.
pub fn classify_by_keywords(text: &str, raw_response: &str) -> SceneClassification {
    let text = normalize_for_matching(text);
    let response = normalize_for_matching(raw_response);

    let mut best: Option<(EnvironmentCategory, f64)> = None;

    for category in EnvironmentCategory::ALL {
        let score: f64 = category
            .keywords()
            .iter()
            .map(|keyword| {
                let keyword = normalize_for_matching(keyword);
                let mut points = 0.0;
                if text.contains(&keyword) {
                    points += TEXT_MATCH_WEIGHT;
                }
                if response.contains(&keyword) {
                    points += RESPONSE_MATCH_WEIGHT;
                }
                points
            })
            .sum();

        let current = best.map(|(_, s)| s).unwrap_or(0.0);
        if score > current {
            best = Some((category, score));
        }
    }

    match best {
        Some((category, score)) => SceneClassification {
            category,
            confidence: (score * CONFIDENCE_PER_POINT).min(MAX_HEURISTIC_CONFIDENCE),
            elements: category
                .keywords()
                .iter()
                .filter(|keyword| text.contains(&normalize_for_matching(keyword)))
                .map(|keyword| keyword.to_string())
                .collect(),
        },
        None => SceneClassification::none(),
    }
}

/// How a scene classification was obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvironmentOutcome {
    /// The model answered with a structured object.
    Remote {
        classification: SceneClassification,
        raw_response: String,
    },
    /// The model answered but the answer was not usable; keywords decided.
    Heuristic {
        classification: SceneClassification,
        raw_response: String,
    },
    /// No classification could be attempted.
    Error { reason: String },
}

impl EnvironmentOutcome {
    pub fn method(&self) -> &'static str {
        match self {
            Self::Remote { .. } => "remote",
            Self::Heuristic { .. } => "heuristic",
            Self::Error { .. } => "error",
        }
    }

    pub fn classification(&self) -> Option<&SceneClassification> {
        match self {
            Self::Remote { classification, .. } | Self::Heuristic { classification, .. } => {
                Some(classification)
            }
            Self::Error { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentAnalysis {
    pub text: String,
    pub outcome: EnvironmentOutcome,
}

impl EnvironmentAnalysis {
    pub fn new(text: impl Into<String>, outcome: EnvironmentOutcome) -> Self {
        Self {
            text: text.into(),
            outcome,
        }
    }

    pub fn error(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(
            text,
            EnvironmentOutcome::Error {
                reason: reason.into(),
            },
        )
    }

    pub fn describes_environment(&self) -> bool {
        self.outcome
            .classification()
            .is_some_and(|c| c.category != EnvironmentCategory::None)
    }

    /// Category name, `"erro"` when classification failed.
    pub fn category_name(&self) -> &'static str {
        self.outcome
            .classification()
            .map(|c| c.category.as_str())
            .unwrap_or("erro")
    }

    pub fn confidence(&self) -> f64 {
        self.outcome
            .classification()
            .map(|c| c.confidence)
            .unwrap_or(0.0)
    }

    pub fn elements(&self) -> &[String] {
        self.outcome
            .classification()
            .map(|c| c.elements.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Serialize)]
struct EnvironmentRecord<'a> {
    text: &'a str,
    describes_environment: bool,
    category: &'static str,
    confidence: f64,
    elements: &'a [String],
    method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_response: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl Serialize for EnvironmentAnalysis {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (raw_response, error) = match &self.outcome {
            EnvironmentOutcome::Remote { raw_response, .. }
            | EnvironmentOutcome::Heuristic { raw_response, .. } => {
                (Some(raw_response.as_str()), None)
            }
            EnvironmentOutcome::Error { reason } => (None, Some(reason.as_str())),
        };

        EnvironmentRecord {
            text: &self.text,
            describes_environment: self.describes_environment(),
            category: self.category_name(),
            confidence: self.confidence(),
            elements: self.elements(),
            method: self.outcome.method(),
            raw_response,
            error,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_accept_english_and_portuguese_forms() {
        assert_eq!(
            EnvironmentCategory::from_label("Garden"),
            Some(EnvironmentCategory::Garden)
        );
        assert_eq!(
            EnvironmentCategory::from_label("aquatico"),
            Some(EnvironmentCategory::Aquatic)
        );
        assert_eq!(
            EnvironmentCategory::from_label("Não descreve ambiente"),
            Some(EnvironmentCategory::None)
        );
        assert_eq!(EnvironmentCategory::from_label("space station"), None);
    }

    #[test]
    fn keyword_scoring_counts_text_and_response() {
        let result = classify_by_keywords("A cozinha e a sala estavam vazias.", "casa");

        assert_eq!(result.category, EnvironmentCategory::Domestic);
        // cozinha + sala from text, casa from response
        assert!((result.confidence - 2.5 * 0.15).abs() < 1e-9);
        assert_eq!(result.elements, vec!["sala", "cozinha"]);
    }

    #[test]
    fn keyword_ties_keep_earlier_category() {
        // "rio" belongs to both natural and aquatic
        let result = classify_by_keywords("o rio", "");

        assert_eq!(result.category, EnvironmentCategory::Natural);
    }

    #[test]
    fn confidence_is_capped() {
        let result = classify_by_keywords(
            "jardim flores árvores plantas verde parque gramado canteiro",
            "",
        );

        assert_eq!(result.category, EnvironmentCategory::Garden);
        assert_eq!(result.confidence, 0.9);
    }

    #[test]
    fn no_keywords_yields_none() {
        let result = classify_by_keywords("A reunião terminou cedo.", "");

        assert_eq!(result, SceneClassification::none());
    }
}
