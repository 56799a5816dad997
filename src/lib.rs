pub mod analysis;
pub mod blendshape;
pub mod fallback;
pub mod models;
pub mod pipeline;
pub mod session;
pub mod tracking;
pub mod utils;

pub use analysis::{ActivationSet, AnalysisConfig, BehaviorMetrics, Emotion};
pub use blendshape::{BlendshapeAccessor, BlendshapeFrame, CalibrationBaseline};
pub use fallback::estimate_from_text;
pub use models::{
    BehaviorRecord, QuestionEmotionSummary, SessionEmotionSummary, SummarySource, Tone,
};
pub use pipeline::FrameAnalyzer;
pub use session::{SessionTracker, VocalSample};
pub use tracking::{AudioSource, FrameSource, TrackingConfig, TrackingController, TrackingStatus};
