//! State owned by a run and progress reporting types

use std::fmt;
use std::path::PathBuf;

use crate::api::StopReason;
use crate::record::{Subject, SubjectKind, SubjectResult};
use crate::stats::{EditorCounter, RunSummary};

/// Phase of a single subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubjectPhase {
    #[default]
    Fetching,
    Exporting,
    Aggregating,
    Done,
    /// Nothing was fetched; no file was written
    Skipped,
}

impl fmt::Display for SubjectPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetching => write!(f, "Fetching"),
            Self::Exporting => write!(f, "Exporting"),
            Self::Aggregating => write!(f, "Aggregating"),
            Self::Done => write!(f, "Done"),
            Self::Skipped => write!(f, "Skipped"),
        }
    }
}

/// Progress information for run callbacks
#[derive(Debug, Clone)]
pub struct RunProgress {
    /// 1-based position of the current subject
    pub current: usize,
    pub total: usize,
    pub subject: String,
    pub phase: SubjectPhase,
}

/// What happened to one subject
#[derive(Debug, Clone)]
pub struct SubjectReport {
    pub subject: Subject,
    pub edits: usize,
    pub pages: usize,
    pub stop: StopReason,
    /// File written for this subject, if any
    pub output: Option<PathBuf>,
    pub phase: SubjectPhase,
}

/// A non-fatal failure recorded during a run
#[derive(Debug, Clone)]
pub struct RunFailure {
    /// Subject name or report file the failure belongs to
    pub target: String,
    pub message: String,
}

impl RunFailure {
    pub fn new(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            message: message.into(),
        }
    }
}

/// Everything a run accumulates. Owned by the engine while running and
/// handed to the caller afterwards.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    /// Combined edit counts across all subjects
    pub counter: EditorCounter,
    /// Non-empty subject results in processing order
    pub results: Vec<SubjectResult>,
    /// One report per requested subject, including skipped ones
    pub reports: Vec<SubjectReport>,
    pub failures: Vec<RunFailure>,
    pub consolidated_path: Option<PathBuf>,
    pub summary_path: Option<PathBuf>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished subject: count its editors and retain it
    pub fn absorb(&mut self, result: SubjectResult) {
        self.counter.merge(&result.records);
        self.results.push(result);
    }

    /// Sum of per-subject edit counts
    pub fn total_edits(&self) -> usize {
        self.results.iter().map(SubjectResult::total).sum()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn summary(&self, label: &str, kind: SubjectKind) -> RunSummary {
        RunSummary::new(label, kind, &self.results, &self.counter)
    }
}
