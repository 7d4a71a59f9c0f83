mod helpers;

use indexmap::IndexMap;

use helpers::assert_close;
use trilha::domain::{
    AggregatedEmotion, Emotion, EmotionStats, MoodProfile, Soundtrack, classify_mood,
    mood_profile, recommend_soundtrack,
};

fn aggregated(entries: &[(&str, f64, usize)]) -> IndexMap<String, AggregatedEmotion> {
    entries
        .iter()
        .map(|(label, mean_score, frequency)| {
            let stats = EmotionStats {
                mean_score: *mean_score,
                frequency: *frequency,
                max_score: *mean_score,
            };
            (label.to_string(), AggregatedEmotion::from_stats(label, &stats))
        })
        .collect()
}

#[test]
fn given_known_label_when_looking_up_profile_then_returns_table_entry() {
    let profile = mood_profile("joy");

    assert_eq!(profile.soundtrack, Soundtrack::Alegre);
    assert_close(profile.energy, 0.8);
    assert_close(profile.valence, 0.8);
}

#[test]
fn given_label_with_case_and_padding_when_looking_up_then_still_matches() {
    assert_eq!(mood_profile("  Very Positive ").soundtrack, Soundtrack::Alegre);
    assert_eq!(mood_profile("ANGER").soundtrack, Soundtrack::Intensa);
}

#[test]
fn given_unknown_label_when_looking_up_profile_then_returns_neutral() {
    assert_eq!(mood_profile("schadenfreude"), MoodProfile::NEUTRAL);
    assert_eq!(mood_profile(""), MoodProfile::NEUTRAL);
}

#[test]
fn given_every_emotion_when_profiled_then_values_are_in_unit_range() {
    for emotion in Emotion::ALL {
        let profile = emotion.mood_profile();
        assert!((0.0..=1.0).contains(&profile.energy), "{emotion:?}");
        assert!((0.0..=1.0).contains(&profile.valence), "{emotion:?}");
        assert_eq!(Emotion::from_label(emotion.label()), Some(emotion));
    }
}

#[test]
fn given_values_just_above_thresholds_when_classifying_then_picks_extreme_buckets() {
    assert_eq!(classify_mood(0.71, 0.71), Soundtrack::Alegre);
    assert_eq!(classify_mood(0.71, 0.29), Soundtrack::Intensa);
    assert_eq!(classify_mood(0.29, 0.29), Soundtrack::Melancolica);
    assert_eq!(classify_mood(0.29, 0.71), Soundtrack::Calma);
}

#[test]
fn given_values_on_boundaries_when_classifying_then_comparisons_are_strict() {
    assert_eq!(classify_mood(0.7, 0.7), Soundtrack::Otimista);
    assert_eq!(classify_mood(0.3, 0.3), Soundtrack::Sombria);
    assert_eq!(classify_mood(0.5, 0.6), Soundtrack::Ambiente);
    assert_eq!(classify_mood(0.5, 0.4), Soundtrack::Ambiente);
}

#[test]
fn given_middle_values_when_classifying_then_uses_valence_buckets() {
    assert_eq!(classify_mood(0.5, 0.65), Soundtrack::Otimista);
    assert_eq!(classify_mood(0.5, 0.35), Soundtrack::Sombria);
    assert_eq!(classify_mood(0.5, 0.5), Soundtrack::Ambiente);
}

#[test]
fn given_no_emotions_when_recommending_then_returns_neutral_ambient() {
    let recommendation = recommend_soundtrack(&IndexMap::new());

    assert_eq!(recommendation.soundtrack, Soundtrack::Ambiente);
    assert_close(recommendation.energy, 0.5);
    assert_close(recommendation.valence, 0.5);
}

#[test]
fn given_zero_weight_emotions_when_recommending_then_returns_neutral_ambient() {
    let recommendation = recommend_soundtrack(&aggregated(&[("anger", 0.0, 3), ("joy", 0.9, 0)]));

    assert_eq!(recommendation.soundtrack, Soundtrack::Ambiente);
    assert_close(recommendation.energy, 0.5);
    assert_close(recommendation.valence, 0.5);
}

#[test]
fn given_weighted_emotions_when_recommending_then_averages_by_mean_times_frequency() {
    let recommendation =
        recommend_soundtrack(&aggregated(&[("joy", 0.7, 2), ("sadness", 0.9, 1)]));

    assert_close(recommendation.energy, 0.57);
    assert_close(recommendation.valence, 0.57);
    assert_eq!(recommendation.soundtrack, Soundtrack::Ambiente);
    assert!(recommendation.description.contains("ambiente"));
}

#[test]
fn given_single_strong_emotion_when_recommending_then_follows_its_profile() {
    let recommendation = recommend_soundtrack(&aggregated(&[("excitement", 0.9, 4)]));

    assert_eq!(recommendation.soundtrack, Soundtrack::Alegre);
    assert_close(recommendation.energy, 0.9);
    assert_close(recommendation.valence, 0.8);
}

#[test]
fn given_same_input_when_recommending_twice_then_results_are_identical() {
    let input = aggregated(&[("fear", 0.4, 3), ("love", 0.8, 1), ("curiosity", 0.5, 2)]);

    assert_eq!(recommend_soundtrack(&input), recommend_soundtrack(&input));
}
