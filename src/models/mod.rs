pub mod record;
pub mod summary;

pub use record::BehaviorRecord;
pub use summary::{QuestionEmotionSummary, SessionEmotionSummary, SummarySource, Tone};
