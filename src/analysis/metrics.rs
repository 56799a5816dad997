use super::activations::ActivationSet;

/// Continuous 0-100 behavioral scores for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BehaviorMetrics {
    pub attention: f32,
    pub stress_level: f32,
    pub confidence: f32,
    pub engagement: f32,
}

/// Derive the four metrics from one frame's activations.
///
/// Attention and stress must be clamped before confidence is computed,
/// since confidence reads both of them.
pub fn estimate(a: &ActivationSet) -> BehaviorMetrics {
    // Attention: penalize looking away or down and excessive blinking
    let attention = clamp_pct(100.0 - (a.look_out * 100.0 + a.look_down * 80.0 + a.blink * 10.0));

    // Stress: lip pressing and brow tension, minus genuine smiling
    let stress_level = clamp_pct(
        a.lip_press * 60.0 + a.brow_furrow * 50.0 + a.blink * 20.0 - a.smile_muscle * 30.0,
    );

    // Confidence: steady gaze and a slight smile, minus nervous lip pressing
    // and overall tension
    let confidence = clamp_pct(
        50.0 + attention * 0.3 + a.smile_muscle * 20.0 - a.lip_press * 40.0 - stress_level * 0.2,
    );

    // Engagement: high-energy expressions
    let engagement = clamp_pct(
        attention * 0.4 + a.smile_muscle * 30.0 + a.brow_outer_up * 20.0 + a.eye_wide * 10.0,
    );

    BehaviorMetrics {
        attention: attention.round(),
        stress_level: stress_level.round(),
        confidence: confidence.round(),
        engagement: engagement.round(),
    }
}

fn clamp_pct(value: f32) -> f32 {
    value.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resting_face_baseline() {
        let metrics = estimate(&ActivationSet::default());

        assert_eq!(metrics.attention, 100.0);
        assert_eq!(metrics.stress_level, 0.0);
        assert_eq!(metrics.confidence, 80.0);
        assert_eq!(metrics.engagement, 40.0);
    }

    #[test]
    fn confidence_reads_the_clamped_stress() {
        // Raw stress is 110 and must clamp to 100 before confidence uses it:
        // confidence = 50 + 30 + 0 - 40 - 0.2 * 100 = 20 (not 18)
        let activations = ActivationSet {
            lip_press: 1.0,
            brow_furrow: 1.0,
            ..Default::default()
        };
        let metrics = estimate(&activations);

        assert_eq!(metrics.stress_level, 100.0);
        assert_eq!(metrics.confidence, 20.0);
    }

    #[test]
    fn outputs_stay_inside_the_percent_range() {
        let extremes = [
            ActivationSet {
                look_out: 2.0,
                look_down: 2.0,
                blink: 2.0,
                lip_press: 1.0,
                brow_furrow: 1.0,
                ..Default::default()
            },
            ActivationSet {
                smile_muscle: 1.0,
                cheek_muscle: 1.0,
                brow_outer_up: 1.0,
                eye_wide: 1.0,
                ..Default::default()
            },
            ActivationSet::default(),
        ];

        for activations in extremes {
            let metrics = estimate(&activations);
            for value in [
                metrics.attention,
                metrics.stress_level,
                metrics.confidence,
                metrics.engagement,
            ] {
                assert!((0.0..=100.0).contains(&value), "out of range: {value}");
            }
        }
    }

    #[test]
    fn gaze_drift_costs_attention() {
        let activations = ActivationSet {
            look_out: 0.5,
            ..Default::default()
        };
        assert_eq!(estimate(&activations).attention, 50.0);
    }
}
