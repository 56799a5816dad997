pub mod config;
pub mod controller;
mod loop_worker;
pub mod sources;

pub use config::TrackingConfig;
pub use controller::TrackingController;
pub use sources::{AudioSource, FrameSource, TrackingStatus};
