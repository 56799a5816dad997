use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::analysis::Emotion;
use crate::models::{
    BehaviorRecord, QuestionEmotionSummary, SessionEmotionSummary, SummarySource, Tone,
};

/// Discretized audio-activity reading taken at the analysis cadence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum VocalSample {
    Confident,
    Quiet,
}

impl VocalSample {
    pub fn from_volume(volume: f32, speaking_threshold: f32) -> Self {
        if volume > speaking_threshold {
            VocalSample::Confident
        } else {
            VocalSample::Quiet
        }
    }
}

/// Accumulates per-frame results into per-question and whole-session
/// summaries. Cloning yields another handle to the same state, so the
/// sampling loop and the answer-submission path can share one tracker
/// without any global slot.
pub struct SessionTracker {
    inner: Arc<Mutex<TrackerState>>,
}

struct TrackerState {
    session_id: String,
    session_started_at: DateTime<Utc>,
    question_id: Option<String>,
    question_started_at: Option<DateTime<Utc>>,
    question_records: Vec<BehaviorRecord>,
    question_emotions: Vec<Emotion>,
    session_records: Vec<BehaviorRecord>,
    session_emotions: Vec<Emotion>,
    vocal_samples: Vec<VocalSample>,
}

impl TrackerState {
    fn fresh() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            session_started_at: Utc::now(),
            question_id: None,
            question_started_at: None,
            question_records: Vec::new(),
            question_emotions: Vec::new(),
            session_records: Vec::new(),
            session_emotions: Vec::new(),
            vocal_samples: Vec::new(),
        }
    }
}

impl SessionTracker {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(TrackerState::fresh())),
        }
    }

    pub async fn session_id(&self) -> String {
        self.inner.lock().await.session_id.clone()
    }

    pub async fn active_question(&self) -> Option<String> {
        self.inner.lock().await.question_id.clone()
    }

    /// Switch to a new question. Fully clears the per-question buffers
    /// before the first frame of the new question can land, and returns the
    /// new question's start timestamp.
    pub async fn begin_question(&self, question_id: impl Into<String>) -> DateTime<Utc> {
        let started_at = Utc::now();
        let mut state = self.inner.lock().await;
        state.question_id = Some(question_id.into());
        state.question_started_at = Some(started_at);
        state.question_records.clear();
        state.question_emotions.clear();
        started_at
    }

    /// Drop the active question and its buffers without touching the
    /// session scope.
    pub async fn clear_question(&self) {
        let mut state = self.inner.lock().await;
        state.question_id = None;
        state.question_started_at = None;
        state.question_records.clear();
        state.question_emotions.clear();
    }

    /// Append one analyzed frame. Records always land in the session scope;
    /// the question scope only accumulates while a question is active.
    pub async fn record(&self, record: BehaviorRecord) {
        let mut state = self.inner.lock().await;

        state.session_emotions.push(record.emotion);
        state.session_records.push(record.clone());

        if state.question_id.is_some() {
            state.question_emotions.push(record.emotion);
            state.question_records.push(record);
        }
    }

    pub async fn record_vocal(&self, sample: VocalSample) {
        self.inner.lock().await.vocal_samples.push(sample);
    }

    /// Summary of the active question, or None before the first frame.
    ///
    /// Duration runs from the question start to the latest record, so
    /// repeated calls without an intervening frame return identical
    /// summaries.
    pub async fn question_summary(&self) -> Option<QuestionEmotionSummary> {
        let state = self.inner.lock().await;

        if state.question_records.is_empty() {
            return None;
        }

        let records = &state.question_records;
        let tones: Vec<Tone> = state
            .question_emotions
            .iter()
            .map(|e| Tone::from(*e))
            .collect();
        let emotion_counts = count_labels(&tones);

        let duration_ms = match (state.question_started_at, records.last()) {
            (Some(started), Some(last)) => {
                (last.timestamp - started).num_milliseconds().max(0) as u64
            }
            _ => 0,
        };

        Some(QuestionEmotionSummary {
            predominant_emotion: predominant(&emotion_counts),
            avg_confidence: rounded_mean(records.iter().map(|r| r.confidence)),
            avg_stress: rounded_mean(records.iter().map(|r| r.stress_level)),
            avg_engagement: rounded_mean(records.iter().map(|r| r.engagement)),
            total_samples: records.len(),
            duration_ms,
            emotion_history: tones,
            behavior_history: records.clone(),
            emotion_counts,
            source: SummarySource::FacialTracking,
        })
    }

    /// Close the session: return the whole-interview summary (None when no
    /// frame was ever analyzed) and reset every buffer for the next session.
    pub async fn end_session(&self) -> Option<SessionEmotionSummary> {
        let mut state = self.inner.lock().await;

        let summary = if state.session_records.is_empty() {
            None
        } else {
            let tones: Vec<Tone> = state
                .session_emotions
                .iter()
                .map(|e| Tone::from(*e))
                .collect();
            let emotion_counts = count_labels(&tones);
            let records = &state.session_records;

            let duration_ms = records
                .last()
                .map(|last| {
                    (last.timestamp - state.session_started_at)
                        .num_milliseconds()
                        .max(0) as u64
                })
                .unwrap_or(0);

            Some(SessionEmotionSummary {
                session_id: state.session_id.clone(),
                predominant_emotion: predominant(&emotion_counts),
                avg_confidence: rounded_mean(records.iter().map(|r| r.confidence)),
                avg_stress: rounded_mean(records.iter().map(|r| r.stress_level)),
                avg_engagement: rounded_mean(records.iter().map(|r| r.engagement)),
                vocal_confidence: vocal_confidence(&state.vocal_samples),
                total_samples: records.len(),
                duration_ms,
                emotion_counts,
            })
        };

        *state = TrackerState::fresh();
        summary
    }
}

impl Clone for SessionTracker {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn count_labels(labels: &[Tone]) -> HashMap<Tone, u32> {
    let mut counts = HashMap::new();
    for label in labels {
        *counts.entry(*label).or_insert(0) += 1;
    }
    counts
}

/// Label with the highest count; ties break toward the earlier label in
/// `Tone::ALL`, a fixed documented order.
fn predominant(counts: &HashMap<Tone, u32>) -> Tone {
    let mut best = Tone::Neutral;
    let mut best_count = 0u32;

    for candidate in Tone::ALL {
        let count = counts.get(&candidate).copied().unwrap_or(0);
        if count > best_count {
            best_count = count;
            best = candidate;
        }
    }

    best
}

fn rounded_mean(values: impl Iterator<Item = f32>) -> u32 {
    let mut sum = 0.0f32;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 {
        return 0;
    }
    (sum / count as f32).round() as u32
}

/// Share of non-quiet samples, as a percentage. An empty buffer counts as
/// fully confident (nothing was ever heard to be quiet).
fn vocal_confidence(samples: &[VocalSample]) -> u32 {
    if samples.is_empty() {
        return 100;
    }
    let quiet = samples.iter().filter(|s| **s == VocalSample::Quiet).count();
    (100.0 - (quiet as f32 / samples.len() as f32) * 100.0).round() as u32
}
