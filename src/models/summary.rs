use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::analysis::Emotion;
use crate::models::BehaviorRecord;

/// Label space for summaries. The eight facial emotions plus the tones the
/// text fallback can derive when no video data exists.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Neutral,
    Happy,
    Angry,
    Sad,
    Surprised,
    Fear,
    Disgust,
    PoliteSmile,
    Confident,
    Uncertain,
    Engaged,
}

impl Tone {
    /// Fixed order used to break count ties when picking a predominant label.
    pub const ALL: [Tone; 11] = [
        Tone::Neutral,
        Tone::Happy,
        Tone::Angry,
        Tone::Sad,
        Tone::Surprised,
        Tone::Fear,
        Tone::Disgust,
        Tone::PoliteSmile,
        Tone::Confident,
        Tone::Uncertain,
        Tone::Engaged,
    ];
}

impl From<Emotion> for Tone {
    fn from(emotion: Emotion) -> Self {
        match emotion {
            Emotion::Neutral => Tone::Neutral,
            Emotion::Happy => Tone::Happy,
            Emotion::Angry => Tone::Angry,
            Emotion::Sad => Tone::Sad,
            Emotion::Surprised => Tone::Surprised,
            Emotion::Fear => Tone::Fear,
            Emotion::Disgust => Tone::Disgust,
            Emotion::PoliteSmile => Tone::PoliteSmile,
        }
    }
}

/// Where a summary's numbers came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SummarySource {
    FacialTracking,
    TextAnalysisFallback,
}

/// Running summary of the active question, built on demand from the
/// per-question buffers and consumed by the feedback generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionEmotionSummary {
    pub predominant_emotion: Tone,
    pub emotion_counts: HashMap<Tone, u32>,
    pub avg_confidence: u32,
    pub avg_stress: u32,
    pub avg_engagement: u32,
    pub total_samples: usize,
    pub duration_ms: u64,
    pub emotion_history: Vec<Tone>,
    pub behavior_history: Vec<BehaviorRecord>,
    pub source: SummarySource,
}

/// Whole-interview summary returned when a session ends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionEmotionSummary {
    pub session_id: String,
    pub predominant_emotion: Tone,
    pub emotion_counts: HashMap<Tone, u32>,
    pub avg_confidence: u32,
    pub avg_stress: u32,
    pub avg_engagement: u32,
    /// 100 * (1 - quiet samples / total samples)
    pub vocal_confidence: u32,
    pub total_samples: usize,
    pub duration_ms: u64,
}
