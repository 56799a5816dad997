pub mod activations;
pub mod config;
pub mod emotion;
pub mod metrics;

pub use activations::ActivationSet;
pub use config::AnalysisConfig;
pub use emotion::{classify, Emotion};
pub use metrics::{estimate, BehaviorMetrics};
