use serde::{Deserialize, Serialize};

use super::activations::ActivationSet;
use super::config::AnalysisConfig;

/// Emotion label attached to every analyzed frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Neutral,
    Happy,
    Angry,
    Sad,
    Surprised,
    Fear,
    Disgust,
    PoliteSmile,
}

impl Emotion {
    /// Every label, in the order used for deterministic tie-breaks.
    pub const ALL: [Emotion; 8] = [
        Emotion::Neutral,
        Emotion::Happy,
        Emotion::Angry,
        Emotion::Sad,
        Emotion::Surprised,
        Emotion::Fear,
        Emotion::Disgust,
        Emotion::PoliteSmile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Neutral => "neutral",
            Emotion::Happy => "happy",
            Emotion::Angry => "angry",
            Emotion::Sad => "sad",
            Emotion::Surprised => "surprised",
            Emotion::Fear => "fear",
            Emotion::Disgust => "disgust",
            Emotion::PoliteSmile => "polite_smile",
        }
    }
}

impl Default for Emotion {
    fn default() -> Self {
        Emotion::Neutral
    }
}

/// Score every candidate label and pick the dominant one.
///
/// Candidates are evaluated in a fixed order (happy, angry, sad, surprised,
/// fear, disgust); a candidate must strictly exceed the current maximum, so
/// on an exact tie the earlier candidate wins. Nothing above the
/// sensitivity threshold means the face is neutral.
pub fn classify(activations: &ActivationSet, config: &AnalysisConfig) -> Emotion {
    let candidates = candidate_scores(activations);

    let mut detected = Emotion::Neutral;
    let mut max_score = config.sensitivity_threshold;

    for (emotion, score) in candidates {
        if score > max_score {
            max_score = score;
            detected = emotion;
        }
    }

    // Duchenne check: a mouth smile without the eye crinkle is a social
    // smile, not genuine happiness
    if detected == Emotion::Happy
        && activations.cheek_muscle < activations.smile_muscle * config.duchenne_cheek_ratio
    {
        detected = Emotion::PoliteSmile;
    }

    detected
}

/// Weighted linear combinations per candidate. Weights are fixed design
/// constants; the subtractive terms can push a score negative, which the
/// neutral floor then filters out.
fn candidate_scores(a: &ActivationSet) -> [(Emotion, f32); 6] {
    [
        (
            Emotion::Happy,
            a.smile_muscle * 0.7 + a.cheek_muscle * 0.3,
        ),
        (
            // Smile is subtracted to avoid "smiling while frowning" false positives
            Emotion::Angry,
            a.brow_furrow * 0.5 + a.lip_press * 0.3 + a.eye_squint * 0.2 - a.smile_muscle,
        ),
        (
            Emotion::Sad,
            a.brow_inner_up * 0.6 + a.mouth_frown * 0.4 + a.look_down * 0.2,
        ),
        (
            Emotion::Surprised,
            a.brow_outer_up * 0.4 + a.eye_wide * 0.4 + a.jaw_drop * 0.2,
        ),
        (
            // Like surprise but with flat inner-raised brows and a closed jaw
            Emotion::Fear,
            a.brow_inner_up * 0.5 + a.eye_wide * 0.4 + a.lip_press * 0.1 - a.jaw_drop * 0.2,
        ),
        (
            Emotion::Disgust,
            a.nose_wrinkle * 1.0 + a.mouth_frown * 0.2,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AnalysisConfig {
        AnalysisConfig::default()
    }

    #[test]
    fn resting_face_is_neutral() {
        let activations = ActivationSet::default();
        assert_eq!(classify(&activations, &config()), Emotion::Neutral);
    }

    #[test]
    fn genuine_smile_is_happy() {
        let activations = ActivationSet {
            smile_muscle: 0.8,
            cheek_muscle: 0.5,
            ..Default::default()
        };
        assert_eq!(classify(&activations, &config()), Emotion::Happy);
    }

    #[test]
    fn smile_without_cheek_is_polite_smile() {
        // happy score 0.7*0.8 + 0.3*0.05 = 0.575 wins, but cheek 0.05 is
        // below 0.3 * smile 0.8 = 0.24
        let activations = ActivationSet {
            smile_muscle: 0.8,
            cheek_muscle: 0.05,
            ..Default::default()
        };
        assert_eq!(classify(&activations, &config()), Emotion::PoliteSmile);
    }

    #[test]
    fn score_at_threshold_stays_neutral() {
        // happy score is exactly 0.2; the winner must strictly exceed it
        let activations = ActivationSet {
            smile_muscle: 0.2,
            cheek_muscle: 0.2,
            ..Default::default()
        };
        assert_eq!(classify(&activations, &config()), Emotion::Neutral);
    }

    #[test]
    fn smile_subtraction_suppresses_anger() {
        let activations = ActivationSet {
            brow_furrow: 0.5,
            lip_press: 0.4,
            smile_muscle: 0.5,
            cheek_muscle: 0.4,
            ..Default::default()
        };
        // angry raw: 0.25 + 0.12 - 0.5 < 0; happy: 0.47 wins
        assert_eq!(classify(&activations, &config()), Emotion::Happy);
    }

    #[test]
    fn exact_tie_goes_to_earlier_candidate() {
        // happy = 0.7*0.5 + 0.3*0.5 = 0.5 and disgust = 0.5 tie exactly;
        // happy is evaluated first so it wins
        let activations = ActivationSet {
            smile_muscle: 0.5,
            cheek_muscle: 0.5,
            nose_wrinkle: 0.5,
            ..Default::default()
        };
        assert_eq!(classify(&activations, &config()), Emotion::Happy);
    }

    #[test]
    fn any_unit_interval_activation_yields_a_defined_label() {
        let grid = [0.0_f32, 0.15, 0.5, 1.0];
        for &lo in &grid {
            for &hi in &grid {
                let activations = ActivationSet {
                    smile_muscle: lo,
                    cheek_muscle: hi,
                    brow_furrow: hi,
                    brow_inner_up: lo,
                    brow_outer_up: hi,
                    eye_wide: lo,
                    nose_wrinkle: hi,
                    mouth_frown: lo,
                    lip_press: hi,
                    jaw_drop: lo,
                    eye_squint: hi,
                    look_out: lo,
                    look_down: hi,
                    blink: lo,
                };
                let label = classify(&activations, &config());
                assert!(Emotion::ALL.contains(&label));
            }
        }
    }
}
