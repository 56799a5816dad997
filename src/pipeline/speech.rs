use crate::analysis::{AnalysisConfig, Emotion};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeechFilterOutcome {
    pub emotion: Emotion,
    pub is_talking: bool,
}

/// Suppress emotion labels that are artifacts of talking.
///
/// A moving jaw or active microphone means the mouth shape is speech, not
/// affect; surprised and fear are the labels a talking mouth fakes most, so
/// they collapse to neutral. Metrics are left untouched.
pub fn apply(
    emotion: Emotion,
    jaw_drop: f32,
    audio_active: bool,
    config: &AnalysisConfig,
) -> SpeechFilterOutcome {
    let is_talking = audio_active || jaw_drop > config.jaw_open_talking_threshold;

    let emotion = if is_talking && matches!(emotion, Emotion::Surprised | Emotion::Fear) {
        Emotion::Neutral
    } else {
        emotion
    };

    SpeechFilterOutcome { emotion, is_talking }
}
