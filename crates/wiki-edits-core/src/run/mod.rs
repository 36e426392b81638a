//! Multi-subject runs: fetch, export and aggregate each subject in turn

mod engine;
mod preset;
mod state;

pub use engine::{ProgressCallback, RunEngine, RunOptions, SummaryOptions};
pub use preset::{RunPreset, POLITICAL_FIGURES};
pub use state::{RunFailure, RunProgress, RunState, SubjectPhase, SubjectReport};
