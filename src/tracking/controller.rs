use anyhow::{bail, Context, Result};
use log::info;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::analysis::AnalysisConfig;
use crate::blendshape::CalibrationBaseline;
use crate::models::{BehaviorRecord, QuestionEmotionSummary, SessionEmotionSummary};
use crate::pipeline::FrameAnalyzer;
use crate::session::SessionTracker;

use super::config::TrackingConfig;
use super::loop_worker::{tracking_loop, LoopChannels};
use super::sources::{AudioSource, FrameSource, TrackingStatus};

/// Owns the tracking loop's lifecycle: spawn on start, signal question
/// changes, cancel and join on stop. The tracker handle it hands out is the
/// capability through which collaborators pull summaries.
pub struct TrackingController {
    config: TrackingConfig,
    tracker: SessionTracker,
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
    question_tx: Option<watch::Sender<Option<String>>>,
    status_rx: Option<watch::Receiver<TrackingStatus>>,
    record_rx: Option<watch::Receiver<Option<BehaviorRecord>>>,
}

impl TrackingController {
    pub fn new(config: TrackingConfig) -> Self {
        Self {
            config,
            tracker: SessionTracker::new(),
            handle: None,
            cancel_token: None,
            question_tx: None,
            status_rx: None,
            record_rx: None,
        }
    }

    /// Handle for pulling summaries independently of the loop, e.g. from an
    /// answer-submission path.
    pub fn tracker(&self) -> SessionTracker {
        self.tracker.clone()
    }

    /// Spawn the sampling loop over the given sources. Question summaries
    /// are pushed to `summary_tx` at the configured cadence.
    pub fn start(
        &mut self,
        frame_source: Box<dyn FrameSource>,
        audio_source: Box<dyn AudioSource>,
        calibration: Option<CalibrationBaseline>,
        summary_tx: mpsc::Sender<QuestionEmotionSummary>,
    ) -> Result<()> {
        if self.handle.is_some() {
            bail!("tracking already active");
        }

        info!("starting behavior tracking loop");

        let cancel_token = CancellationToken::new();
        let (question_tx, question_rx) = watch::channel(None);
        let (status_tx, status_rx) = watch::channel(TrackingStatus::Idle);
        let (record_tx, record_rx) = watch::channel(None);

        let analyzer = FrameAnalyzer::new(AnalysisConfig::default(), calibration);
        let channels = LoopChannels {
            status_tx,
            record_tx,
            summary_tx,
            question_rx,
        };

        let handle = tokio::spawn(tracking_loop(
            frame_source,
            audio_source,
            analyzer,
            self.tracker.clone(),
            self.config.clone(),
            channels,
            cancel_token.clone(),
        ));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        self.question_tx = Some(question_tx);
        self.status_rx = Some(status_rx);
        self.record_rx = Some(record_rx);
        Ok(())
    }

    /// Signal the question-lifecycle change; the loop clears the question
    /// buffers and the smoothing window before the next frame.
    pub fn set_question(&self, question_id: Option<String>) -> Result<()> {
        let tx = self
            .question_tx
            .as_ref()
            .context("tracking not active")?;
        tx.send(question_id)
            .map_err(|_| anyhow::anyhow!("tracking loop has exited"))
    }

    pub fn status(&self) -> TrackingStatus {
        self.status_rx
            .as_ref()
            .map(|rx| *rx.borrow())
            .unwrap_or_default()
    }

    /// Latest live record for UI display, if the loop has produced one.
    pub fn latest_record(&self) -> Option<BehaviorRecord> {
        self.record_rx.as_ref().and_then(|rx| rx.borrow().clone())
    }

    /// Watch stream of live records.
    pub fn subscribe_records(&self) -> Option<watch::Receiver<Option<BehaviorRecord>>> {
        self.record_rx.clone()
    }

    /// Cancel the loop and wait for it to release the capture handles.
    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        self.question_tx = None;

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("tracking loop task failed to join")?;
        }
        Ok(())
    }

    /// Stop tracking (if still running) and close out the session.
    pub async fn end_session(&mut self) -> Result<Option<SessionEmotionSummary>> {
        self.stop().await?;
        Ok(self.tracker.end_session().await)
    }
}
