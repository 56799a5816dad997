pub mod smoothing;
pub mod speech;

pub use smoothing::EmotionWindow;
pub use speech::SpeechFilterOutcome;

use chrono::{DateTime, Utc};

use crate::analysis::{self, ActivationSet, AnalysisConfig};
use crate::blendshape::{BlendshapeAccessor, BlendshapeFrame, CalibrationBaseline};
use crate::models::BehaviorRecord;

/// Per-frame inference pipeline: blendshapes -> activations -> label +
/// metrics -> speech filter -> temporal smoothing -> BehaviorRecord.
///
/// Owns the smoothing window, which is reset when the active question
/// changes so one question's jitter never leaks into the next.
pub struct FrameAnalyzer {
    config: AnalysisConfig,
    calibration: Option<CalibrationBaseline>,
    window: EmotionWindow,
}

impl FrameAnalyzer {
    pub fn new(config: AnalysisConfig, calibration: Option<CalibrationBaseline>) -> Self {
        let window = EmotionWindow::new(config.smoothing_window);
        Self {
            config,
            calibration,
            window,
        }
    }

    pub fn analyze(
        &mut self,
        frame: &BlendshapeFrame,
        audio_active: bool,
        timestamp: DateTime<Utc>,
    ) -> BehaviorRecord {
        let accessor = BlendshapeAccessor::new(frame, self.calibration.as_ref());
        let activations = ActivationSet::from_accessor(&accessor);

        let raw_emotion = analysis::classify(&activations, &self.config);
        let metrics = analysis::estimate(&activations);

        let filtered = speech::apply(raw_emotion, activations.jaw_drop, audio_active, &self.config);
        let smoothed = self.window.push(filtered.emotion);

        BehaviorRecord {
            emotion: smoothed,
            attention: metrics.attention,
            stress_level: metrics.stress_level,
            confidence: metrics.confidence,
            engagement: metrics.engagement,
            is_talking: filtered.is_talking,
            timestamp,
        }
    }

    /// Clear the smoothing window, e.g. when the active question changes.
    pub fn reset(&mut self) {
        self.window.reset();
    }

    pub fn set_calibration(&mut self, calibration: Option<CalibrationBaseline>) {
        self.calibration = calibration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Emotion;

    fn analyzer() -> FrameAnalyzer {
        FrameAnalyzer::new(AnalysisConfig::default(), None)
    }

    fn smiling_frame() -> BlendshapeFrame {
        BlendshapeFrame::from_scores([
            ("mouthSmileLeft", 0.8),
            ("mouthSmileRight", 0.8),
            ("cheekSquintLeft", 0.6),
            ("cheekSquintRight", 0.6),
        ])
    }

    #[test]
    fn smiling_frame_produces_happy_record() {
        let mut analyzer = analyzer();
        let record = analyzer.analyze(&smiling_frame(), false, Utc::now());

        assert_eq!(record.emotion, Emotion::Happy);
        assert!(!record.is_talking);
        assert_eq!(record.attention, 100.0);
    }

    #[test]
    fn social_smile_scenario_end_to_end() {
        let frame = BlendshapeFrame::from_scores([
            ("mouthSmileLeft", 0.8),
            ("mouthSmileRight", 0.8),
            ("cheekSquintLeft", 0.05),
            ("cheekSquintRight", 0.05),
        ]);
        let mut analyzer = analyzer();
        let record = analyzer.analyze(&frame, false, Utc::now());

        assert_eq!(record.emotion, Emotion::PoliteSmile);
    }

    #[test]
    fn smoothing_holds_the_previous_majority() {
        let mut analyzer = analyzer();
        for _ in 0..3 {
            analyzer.analyze(&smiling_frame(), false, Utc::now());
        }

        // One neutral frame does not flip the smoothed label
        let record = analyzer.analyze(&BlendshapeFrame::new(), false, Utc::now());
        assert_eq!(record.emotion, Emotion::Happy);
    }

    #[test]
    fn reset_forgets_the_previous_question() {
        let mut analyzer = analyzer();
        for _ in 0..5 {
            analyzer.analyze(&smiling_frame(), false, Utc::now());
        }
        analyzer.reset();

        let record = analyzer.analyze(&BlendshapeFrame::new(), false, Utc::now());
        assert_eq!(record.emotion, Emotion::Neutral);
    }

    #[test]
    fn calibration_cancels_a_resting_smirk() {
        let resting = BlendshapeFrame::from_scores([
            ("mouthSmileLeft", 0.4),
            ("mouthSmileRight", 0.4),
        ]);
        let baseline = CalibrationBaseline::capture(&resting);
        let mut analyzer = FrameAnalyzer::new(AnalysisConfig::default(), Some(baseline));

        let record = analyzer.analyze(&resting, false, Utc::now());
        assert_eq!(record.emotion, Emotion::Neutral);
    }
}
