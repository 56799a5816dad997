use std::collections::HashMap;

/// One sampled video frame's worth of named blendshape scores, as produced
/// by the external landmark detector. Scores are in [0, 1]; names the
/// detector did not report read as 0.
#[derive(Debug, Clone, Default)]
pub struct BlendshapeFrame {
    scores: HashMap<String, f32>,
}

impl BlendshapeFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_scores<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        Self {
            scores: pairs
                .into_iter()
                .map(|(name, score)| (name.into(), score))
                .collect(),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, score: f32) {
        self.scores.insert(name.into(), score);
    }

    /// Raw detector score, 0 when the name is absent from the frame.
    pub fn raw_score(&self, name: &str) -> f32 {
        self.scores.get(name).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scores.keys().map(|name| name.as_str())
    }
}

/// Per-user resting-face offsets, captured once and immutable afterwards.
/// Subtracting these corrects for neutral-expression asymmetry.
#[derive(Debug, Clone, Default)]
pub struct CalibrationBaseline {
    offsets: HashMap<String, f32>,
}

impl CalibrationBaseline {
    /// Capture a baseline from a frame of the user's resting face.
    pub fn capture(frame: &BlendshapeFrame) -> Self {
        Self {
            offsets: frame.scores.clone(),
        }
    }

    pub fn from_offsets(offsets: HashMap<String, f32>) -> Self {
        Self { offsets }
    }

    /// Offset for a blendshape name, 0 when uncalibrated.
    pub fn offset(&self, name: &str) -> f32 {
        self.offsets.get(name).copied().unwrap_or(0.0)
    }
}

/// Baseline-relative read access to a frame. The only point where
/// calibration enters the computation, so downstream rules always operate
/// on never-negative activation magnitudes.
pub struct BlendshapeAccessor<'a> {
    frame: &'a BlendshapeFrame,
    baseline: Option<&'a CalibrationBaseline>,
}

impl<'a> BlendshapeAccessor<'a> {
    pub fn new(frame: &'a BlendshapeFrame, baseline: Option<&'a CalibrationBaseline>) -> Self {
        Self { frame, baseline }
    }

    /// Calibrated score: `max(0, raw - baseline)`.
    pub fn score(&self, name: &str) -> f32 {
        let raw = self.frame.raw_score(name);
        let offset = self
            .baseline
            .map(|baseline| baseline.offset(name))
            .unwrap_or(0.0);
        (raw - offset).max(0.0)
    }

    /// Uncalibrated detector score.
    pub fn raw(&self, name: &str) -> f32 {
        self.frame.raw_score(name)
    }
}
