//! Edit records and the subjects they are fetched for

mod model;
mod subject;

pub use model::{ContinuationToken, EditRecord, SubjectResult, ANONYMOUS};
pub use subject::{Subject, SubjectKind};
