// Analysis — orchestration, progress reporting and the result record.

pub mod cache;
pub mod events;
pub mod orchestrator;
pub mod progress;
pub mod result;

pub use events::AnalysisEvent;
pub use orchestrator::{AnalysisRequest, Analyzer};
pub use progress::{AnalysisState, NoProgress, ProgressLog, ProgressSink};
pub use result::AnalysisResult;
