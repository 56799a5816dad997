use chrono::Utc;
use tokio::sync::{mpsc, watch};
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::models::{BehaviorRecord, QuestionEmotionSummary};
use crate::pipeline::FrameAnalyzer;
use crate::session::{SessionTracker, VocalSample};

use super::config::TrackingConfig;
use super::sources::{AudioSource, FrameSource, TrackingStatus};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

pub(crate) struct LoopChannels {
    pub status_tx: watch::Sender<TrackingStatus>,
    pub record_tx: watch::Sender<Option<BehaviorRecord>>,
    pub summary_tx: mpsc::Sender<QuestionEmotionSummary>,
    pub question_rx: watch::Receiver<Option<String>>,
}

/// Single-task sampling loop. Audio is polled every tick; video analysis
/// and vocal-sample appends run at the analysis cadence; question summaries
/// are pushed to the consumer at their own slower cadence. All pipeline
/// state is touched only from this task.
pub(crate) async fn tracking_loop(
    mut frame_source: Box<dyn FrameSource>,
    mut audio_source: Box<dyn AudioSource>,
    mut analyzer: FrameAnalyzer,
    tracker: SessionTracker,
    config: TrackingConfig,
    mut channels: LoopChannels,
    cancel_token: CancellationToken,
) {
    let video_ok = match frame_source.open() {
        Ok(()) => true,
        Err(err) => {
            log_warn!("frame source unavailable, continuing degraded: {err:#}");
            false
        }
    };
    let audio_ok = match audio_source.open() {
        Ok(()) => true,
        Err(err) => {
            log_warn!("audio source unavailable, continuing without volume: {err:#}");
            false
        }
    };

    let status = if video_ok {
        TrackingStatus::Running
    } else {
        TrackingStatus::Degraded
    };
    let _ = channels.status_tx.send(status);

    let mut ticker = tokio::time::interval(Duration::from_millis(config.poll_interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last_volume: f32 = 0.0;
    let mut last_analysis: Option<Instant> = None;
    let mut last_summary_push: Option<Instant> = None;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if handle_question_change(&mut channels.question_rx, &tracker, &mut analyzer).await {
                    last_summary_push = None;
                }

                // Audio is cheap, sample it every tick
                if audio_ok {
                    match audio_source.poll_volume() {
                        Ok(Some(volume)) => last_volume = volume,
                        Ok(None) => {}
                        Err(err) => log_warn!("audio poll failed: {err:#}"),
                    }
                }

                if cadence_elapsed(last_analysis.as_ref(), config.analysis_interval_ms) {
                    last_analysis = Some(Instant::now());

                    if audio_ok {
                        let sample =
                            VocalSample::from_volume(last_volume, config.speaking_volume_threshold);
                        tracker.record_vocal(sample).await;
                    }

                    if video_ok {
                        analyze_once(
                            &mut *frame_source,
                            &mut analyzer,
                            &tracker,
                            &channels.record_tx,
                            last_volume > config.speaking_volume_threshold,
                        )
                        .await;
                    }
                }

                if cadence_elapsed(last_summary_push.as_ref(), config.summary_push_interval_ms) {
                    last_summary_push = Some(Instant::now());
                    if let Some(summary) = tracker.question_summary().await {
                        if channels.summary_tx.send(summary).await.is_err() {
                            log_warn!("summary consumer dropped, pushes disabled");
                        }
                    }
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("tracking loop shutting down");
                break;
            }
        }
    }

    // Release capture handles synchronously so no collaborator reads stale
    // device state after teardown
    frame_source.close();
    audio_source.close();
    let _ = channels.record_tx.send(None);
    let _ = channels.status_tx.send(TrackingStatus::Stopped);
}

/// Apply a question-lifecycle signal if one arrived. Returns true when the
/// active question changed.
async fn handle_question_change(
    question_rx: &mut watch::Receiver<Option<String>>,
    tracker: &SessionTracker,
    analyzer: &mut FrameAnalyzer,
) -> bool {
    if !question_rx.has_changed().unwrap_or(false) {
        return false;
    }

    let question = question_rx.borrow_and_update().clone();
    match question {
        Some(question_id) => {
            log_info!("question changed to {question_id}, resetting emotion tracking");
            tracker.begin_question(question_id).await;
        }
        None => {
            log_info!("question cleared, dropping per-question buffers");
            tracker.clear_question().await;
        }
    }
    analyzer.reset();
    true
}

async fn analyze_once(
    frame_source: &mut dyn FrameSource,
    analyzer: &mut FrameAnalyzer,
    tracker: &SessionTracker,
    record_tx: &watch::Sender<Option<BehaviorRecord>>,
    audio_active: bool,
) {
    match frame_source.poll_frame() {
        Ok(Some(frame)) => {
            let record = analyzer.analyze(&frame, audio_active, Utc::now());
            tracker.record(record.clone()).await;
            let _ = record_tx.send(Some(record));
        }
        // Detector stall: keep polling, status stays as last set
        Ok(None) => {}
        Err(err) => log_error!("frame poll failed: {err:#}"),
    }
}

fn cadence_elapsed(last: Option<&Instant>, interval_ms: u64) -> bool {
    last.map(|instant| instant.elapsed().as_millis() as u64 >= interval_ms)
        .unwrap_or(true)
}
