//! Text-derived emotion estimate, used by the feedback consumer when no
//! camera-derived summary exists (camera denied, tracking never started).
//! Deterministic: the same answer text always yields the same summary.

use std::collections::HashMap;

use crate::models::{QuestionEmotionSummary, SummarySource, Tone};

const CONFIDENCE_INDICATORS: &[&str] = &[
    "definitely",
    "certainly",
    "absolutely",
    "sure",
    "confident",
    "know",
    "understand",
    "clear",
    "obvious",
    "straightforward",
    "would",
    "will",
    "can",
    "should",
    "implement",
    "use",
    "create",
    "build",
    "develop",
    "design",
    "architect",
    "solution",
];

const STRESS_INDICATORS: &[&str] = &[
    "maybe",
    "perhaps",
    "might",
    "could",
    "not sure",
    "uncertain",
    "think",
    "guess",
    "probably",
    "possibly",
    "difficult",
    "hard",
    "challenge",
    "problem",
    "issue",
    "error",
    "bug",
    "don't know",
    "unsure",
    "confused",
    "complicated",
    "complex",
];

const ENGAGEMENT_INDICATORS: &[&str] = &[
    "example",
    "instance",
    "case",
    "scenario",
    "because",
    "since",
    "therefore",
    "however",
    "additionally",
    "furthermore",
    "also",
    "first",
    "second",
    "then",
    "next",
    "finally",
    "step",
    "process",
    "approach",
    "method",
    "technique",
    "way",
    "how",
];

/// Estimate a question summary from the literal answer text.
///
/// Counts indicator-word hits for confidence, stress, and engagement, then
/// derives percentage scores from hit counts and answer length. Empty or
/// whitespace-only text yields a neutral 50/50/50 summary.
pub fn estimate_from_text(answer: &str) -> QuestionEmotionSummary {
    let text = answer.trim().to_lowercase();
    if text.is_empty() {
        return tone_summary(Tone::Neutral, 50, 50, 50);
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let word_count = words.len();

    let mut confidence_hits = 0u32;
    let mut stress_hits = 0u32;
    let mut engagement_hits = 0u32;

    for word in &words {
        if CONFIDENCE_INDICATORS.iter().any(|ind| word.contains(ind)) {
            confidence_hits += 1;
        }
        if STRESS_INDICATORS.iter().any(|ind| word.contains(ind)) {
            stress_hits += 1;
        }
        if ENGAGEMENT_INDICATORS.iter().any(|ind| word.contains(ind)) {
            engagement_hits += 1;
        }
    }

    // Confidence grows with positive indicators and answer length, shrinks
    // with uncertainty markers
    let confidence_base = (confidence_hits as f32 * 10.0).min(40.0);
    let length_bonus = (word_count as f32 / 5.0).min(30.0);
    let avg_confidence =
        (50.0 + confidence_base + length_bonus - stress_hits as f32 * 5.0).clamp(0.0, 95.0);

    let stress_base = (stress_hits as f32 * 8.0).min(50.0);
    let avg_stress = (30.0 + stress_base).min(90.0);

    let engagement_base = (engagement_hits as f32 * 8.0).min(40.0);
    let detail_bonus = if word_count > 50 {
        20.0
    } else if word_count > 20 {
        10.0
    } else {
        0.0
    };
    let avg_engagement = (40.0 + engagement_base + detail_bonus).min(95.0);

    let tone = if avg_confidence >= 70.0 && avg_stress < 40.0 {
        Tone::Confident
    } else if avg_confidence < 50.0 || avg_stress > 60.0 {
        Tone::Uncertain
    } else if avg_engagement >= 70.0 {
        Tone::Engaged
    } else {
        Tone::Neutral
    };

    tone_summary(
        tone,
        avg_confidence.round() as u32,
        avg_stress.round() as u32,
        avg_engagement.round() as u32,
    )
}

fn tone_summary(
    tone: Tone,
    avg_confidence: u32,
    avg_stress: u32,
    avg_engagement: u32,
) -> QuestionEmotionSummary {
    QuestionEmotionSummary {
        predominant_emotion: tone,
        emotion_counts: HashMap::from([(tone, 1)]),
        avg_confidence,
        avg_stress,
        avg_engagement,
        total_samples: 1,
        duration_ms: 0,
        emotion_history: vec![tone],
        behavior_history: Vec::new(),
        source: SummarySource::TextAnalysisFallback,
    }
}
