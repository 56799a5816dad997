/// Configuration for the tracking loop cadences.
#[derive(Debug, Clone)]
pub struct TrackingConfig {
    /// Loop tick; audio is sampled this often
    pub poll_interval_ms: u64,

    /// Minimum spacing between video analyses (and vocal-sample appends)
    pub analysis_interval_ms: u64,

    /// Minimum spacing between question-summary pushes to the consumer
    pub summary_push_interval_ms: u64,

    /// Volume above this counts as speaking
    pub speaking_volume_threshold: f32,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            analysis_interval_ms: 500,
            summary_push_interval_ms: 2000,
            speaking_volume_threshold: 20.0,
        }
    }
}
