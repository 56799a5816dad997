/// Configuration for the per-frame analysis with tunable thresholds.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Minimum classifier score before a non-neutral label wins
    pub sensitivity_threshold: f32,

    /// Duchenne check: a happy winner with cheek < ratio * smile becomes polite_smile
    pub duchenne_cheek_ratio: f32,

    /// Jaw-open activation above this counts as talking even without audio
    pub jaw_open_talking_threshold: f32,

    /// Majority-vote smoothing window length (frames)
    pub smoothing_window: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sensitivity_threshold: 0.2,
            duchenne_cheek_ratio: 0.3,
            jaw_open_talking_threshold: 0.15,
            smoothing_window: 10,
        }
    }
}
