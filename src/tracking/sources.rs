use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::blendshape::BlendshapeFrame;

/// Facial-landmark detector seen as an opaque collaborator. Any backend
/// that yields named blendshape scores per frame is substitutable.
pub trait FrameSource: Send {
    /// Acquire the capture device. Failure here (permission denied, no
    /// camera) is recoverable: the loop keeps running in degraded mode.
    fn open(&mut self) -> Result<()>;

    /// Latest detector result, if one arrived since the last poll. A stall
    /// (repeated `None`) is not an error.
    fn poll_frame(&mut self) -> Result<Option<BlendshapeFrame>>;

    /// Release the capture handle.
    fn close(&mut self);
}

/// Microphone-level collaborator producing a scalar volume estimate.
pub trait AudioSource: Send {
    fn open(&mut self) -> Result<()>;

    fn poll_volume(&mut self) -> Result<Option<f32>>;

    fn close(&mut self);
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TrackingStatus {
    Idle,
    Running,
    /// Acquisition failed; the loop keeps polling but produces no records.
    Degraded,
    Stopped,
}

impl Default for TrackingStatus {
    fn default() -> Self {
        TrackingStatus::Idle
    }
}
