//! Replay a recorded frame log through the pipeline and print the
//! summaries, for tuning thresholds offline.
//!
//! Usage: `replay <frames.json>` where the file holds a JSON array of
//! `{"timestampMs": .., "volume": .., "blendshapes": [{"categoryName": ..,
//! "score": ..}]}` samples.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use facesense::{
    AnalysisConfig, BlendshapeFrame, FrameAnalyzer, SessionTracker, TrackingConfig, VocalSample,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReplaySample {
    timestamp_ms: i64,
    #[serde(default)]
    volume: f32,
    blendshapes: Vec<BlendshapeScore>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlendshapeScore {
    category_name: String,
    score: f32,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => bail!("usage: replay <frames.json>"),
    };

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read frame log {path}"))?;
    let samples: Vec<ReplaySample> =
        serde_json::from_str(&raw).context("failed to parse frame log")?;

    log::info!("replaying {} samples from {}", samples.len(), path);

    let config = TrackingConfig::default();
    let mut analyzer = FrameAnalyzer::new(AnalysisConfig::default(), None);
    let tracker = SessionTracker::new();
    tracker.begin_question("replay").await;

    for sample in &samples {
        let timestamp = DateTime::<Utc>::from_timestamp_millis(sample.timestamp_ms)
            .with_context(|| format!("invalid timestamp {}", sample.timestamp_ms))?;

        let frame = BlendshapeFrame::from_scores(
            sample
                .blendshapes
                .iter()
                .map(|b| (b.category_name.clone(), b.score)),
        );

        let audio_active = sample.volume > config.speaking_volume_threshold;
        let record = analyzer.analyze(&frame, audio_active, timestamp);
        tracker.record(record).await;
        tracker
            .record_vocal(VocalSample::from_volume(
                sample.volume,
                config.speaking_volume_threshold,
            ))
            .await;
    }

    match tracker.question_summary().await {
        Some(summary) => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        None => println!("no samples produced a summary"),
    }

    if let Some(session) = tracker.end_session().await {
        println!("{}", serde_json::to_string_pretty(&session)?);
    }

    Ok(())
}
