use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::Emotion;

/// One analyzed frame's behavioral reading. Appended to the per-question
/// and session buffers in arrival order and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorRecord {
    pub emotion: Emotion,
    pub attention: f32,
    pub stress_level: f32,
    pub confidence: f32,
    pub engagement: f32,
    pub is_talking: bool,
    pub timestamp: DateTime<Utc>,
}
