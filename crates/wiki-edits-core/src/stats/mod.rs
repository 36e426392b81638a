//! Per-editor statistics
//!
//! [`EditorCounter`] folds edit records into per-editor counts;
//! [`RunSummary`] turns a finished run into the combined summary report.

mod counter;
mod summary;

pub use counter::{EditorCount, EditorCounter};
pub use summary::{RunSummary, SubjectTotal};
