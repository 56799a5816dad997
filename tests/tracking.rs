//! End-to-end tests for the tracking loop against fake capture sources.

use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::sync::mpsc;

use facesense::{
    AudioSource, BlendshapeFrame, Emotion, FrameSource, Tone, TrackingConfig, TrackingController,
    TrackingStatus,
};

/// Frame source that always reports a genuine smile.
struct SmilingCamera;

impl FrameSource for SmilingCamera {
    fn open(&mut self) -> Result<()> {
        Ok(())
    }

    fn poll_frame(&mut self) -> Result<Option<BlendshapeFrame>> {
        Ok(Some(BlendshapeFrame::from_scores([
            ("mouthSmileLeft", 0.8),
            ("mouthSmileRight", 0.8),
            ("cheekSquintLeft", 0.6),
            ("cheekSquintRight", 0.6),
        ])))
    }

    fn close(&mut self) {}
}

/// Camera whose acquisition fails, as when permission is denied.
struct DeniedCamera;

impl FrameSource for DeniedCamera {
    fn open(&mut self) -> Result<()> {
        Err(anyhow!("camera permission denied"))
    }

    fn poll_frame(&mut self) -> Result<Option<BlendshapeFrame>> {
        Ok(None)
    }

    fn close(&mut self) {}
}

struct SilentMicrophone;

impl AudioSource for SilentMicrophone {
    fn open(&mut self) -> Result<()> {
        Ok(())
    }

    fn poll_volume(&mut self) -> Result<Option<f32>> {
        Ok(Some(0.0))
    }

    fn close(&mut self) {}
}

fn fast_config() -> TrackingConfig {
    TrackingConfig {
        poll_interval_ms: 5,
        analysis_interval_ms: 10,
        summary_push_interval_ms: 25,
        speaking_volume_threshold: 20.0,
    }
}

#[tokio::test]
async fn tracking_produces_records_and_summaries() {
    let mut controller = TrackingController::new(fast_config());
    let (summary_tx, mut summary_rx) = mpsc::channel(16);

    controller
        .start(
            Box::new(SmilingCamera),
            Box::new(SilentMicrophone),
            None,
            summary_tx,
        )
        .expect("start");

    controller
        .set_question(Some("q1".to_string()))
        .expect("set question");

    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(controller.status(), TrackingStatus::Running);

    let record = controller.latest_record().expect("live record");
    assert_eq!(record.emotion, Emotion::Happy);
    assert!(!record.is_talking);

    let pushed = summary_rx.recv().await.expect("pushed summary");
    assert_eq!(pushed.predominant_emotion, Tone::Happy);
    assert!(pushed.total_samples >= 1);

    let pulled = controller
        .tracker()
        .question_summary()
        .await
        .expect("pulled summary");
    assert_eq!(pulled.predominant_emotion, Tone::Happy);

    controller.stop().await.expect("stop");
    assert_eq!(controller.status(), TrackingStatus::Stopped);
}

#[tokio::test]
async fn camera_denial_degrades_instead_of_failing() {
    let mut controller = TrackingController::new(fast_config());
    let (summary_tx, _summary_rx) = mpsc::channel(16);

    controller
        .start(
            Box::new(DeniedCamera),
            Box::new(SilentMicrophone),
            None,
            summary_tx,
        )
        .expect("start");

    controller
        .set_question(Some("q1".to_string()))
        .expect("set question");

    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(controller.status(), TrackingStatus::Degraded);
    assert!(controller.latest_record().is_none());
    assert!(controller.tracker().question_summary().await.is_none());

    controller.stop().await.expect("stop");
}

#[tokio::test]
async fn question_change_starts_a_fresh_buffer() {
    let mut controller = TrackingController::new(fast_config());
    let (summary_tx, _summary_rx) = mpsc::channel(64);

    controller
        .start(
            Box::new(SmilingCamera),
            Box::new(SilentMicrophone),
            None,
            summary_tx,
        )
        .expect("start");

    controller
        .set_question(Some("q1".to_string()))
        .expect("set question");
    tokio::time::sleep(Duration::from_millis(120)).await;

    let q1 = controller
        .tracker()
        .question_summary()
        .await
        .expect("q1 summary");

    controller
        .set_question(Some("q2".to_string()))
        .expect("switch question");
    tokio::time::sleep(Duration::from_millis(120)).await;

    let q2 = controller
        .tracker()
        .question_summary()
        .await
        .expect("q2 summary");

    // The q2 buffer started from empty rather than continuing q1's counts
    assert!(q2.total_samples < q1.total_samples + q2.total_samples);
    assert_eq!(controller.tracker().active_question().await.as_deref(), Some("q2"));

    controller.stop().await.expect("stop");
}

#[tokio::test]
async fn end_session_returns_summary_and_clears_state() {
    let mut controller = TrackingController::new(fast_config());
    let (summary_tx, _summary_rx) = mpsc::channel(16);

    controller
        .start(
            Box::new(SmilingCamera),
            Box::new(SilentMicrophone),
            None,
            summary_tx,
        )
        .expect("start");
    controller
        .set_question(Some("q1".to_string()))
        .expect("set question");

    tokio::time::sleep(Duration::from_millis(150)).await;

    let tracker = controller.tracker();
    let summary = controller
        .end_session()
        .await
        .expect("end session")
        .expect("session summary");

    assert_eq!(summary.predominant_emotion, Tone::Happy);
    assert!(summary.total_samples >= 1);
    // Silent microphone discretizes every sample as quiet
    assert_eq!(summary.vocal_confidence, 0);

    // Session scope is cleared for the next run
    assert!(tracker.question_summary().await.is_none());
    assert!(tracker.end_session().await.is_none());
}

#[tokio::test]
async fn starting_twice_is_rejected() {
    let mut controller = TrackingController::new(fast_config());
    let (summary_tx, _summary_rx) = mpsc::channel(16);
    let (summary_tx2, _summary_rx2) = mpsc::channel(16);

    controller
        .start(
            Box::new(SmilingCamera),
            Box::new(SilentMicrophone),
            None,
            summary_tx,
        )
        .expect("start");

    let second = controller.start(
        Box::new(SmilingCamera),
        Box::new(SilentMicrophone),
        None,
        summary_tx2,
    );
    assert!(second.is_err());

    controller.stop().await.expect("stop");
}
