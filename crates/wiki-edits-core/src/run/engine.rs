//! Run engine

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use crate::api::{fetch_all, EditSource, FetchOptions};
use crate::error::{Error, Result};
use crate::export::{ExportFormat, Exporter, FileNaming};
use crate::record::{Subject, SubjectKind, SubjectResult};

use super::state::{RunFailure, RunProgress, RunState, SubjectPhase, SubjectReport};

/// Where and how to write the combined summary report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOptions {
    pub file_name: String,
    /// Shown in the report title
    pub label: String,
}

/// Settings for a run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub fetch: FetchOptions,
    /// Pause between subjects
    pub subject_delay: Duration,
    pub output_dir: PathBuf,
    pub format: ExportFormat,
    pub naming: FileNaming,
    /// Also write one report covering all subjects
    pub consolidated: bool,
    pub summary: Option<SummaryOptions>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            fetch: FetchOptions::default(),
            subject_delay: Duration::from_secs(1),
            output_dir: PathBuf::from("wiki_edits"),
            format: ExportFormat::default(),
            naming: FileNaming::default(),
            consolidated: false,
            summary: None,
        }
    }
}

/// Progress callback type
pub type ProgressCallback = Box<dyn Fn(RunProgress) + Send + Sync>;

/// Drives fetching, exporting and aggregation for a list of subjects.
///
/// Subjects are processed strictly one after another. A subject that yields
/// nothing, or whose file cannot be written, is logged and the run moves on.
pub struct RunEngine<S> {
    source: S,
    options: RunOptions,
    exporter: Box<dyn Exporter>,
    progress_callback: Option<ProgressCallback>,
}

impl<S: EditSource> RunEngine<S> {
    pub fn new(source: S, options: RunOptions) -> Self {
        let exporter = options.format.exporter();
        Self {
            source,
            options,
            exporter,
            progress_callback: None,
        }
    }

    /// Set the progress callback
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Process every subject and write the run-level reports.
    ///
    /// Only an unusable output directory is an error; everything else is
    /// recorded in the returned state.
    pub fn run(&self, subjects: &[Subject]) -> Result<RunState> {
        std::fs::create_dir_all(&self.options.output_dir).map_err(|e| {
            Error::Config(format!(
                "Cannot create output directory {}: {}",
                self.options.output_dir.display(),
                e
            ))
        })?;

        let mut state = RunState::new();
        let total = subjects.len();

        for (i, subject) in subjects.iter().enumerate() {
            if i > 0 {
                thread::sleep(self.options.subject_delay);
            }
            self.process_subject(&mut state, subject, i + 1, total);
        }

        if self.options.consolidated && !state.results.is_empty() {
            self.write_consolidated(&mut state);
        }
        if let Some(summary) = &self.options.summary {
            self.write_summary(&mut state, summary, subjects);
        }

        tracing::info!(
            subjects = total,
            exported = state.results.len(),
            edits = state.total_edits(),
            editors = state.counter.unique_editors(),
            "Run complete"
        );

        Ok(state)
    }

    fn process_subject(&self, state: &mut RunState, subject: &Subject, current: usize, total: usize) {
        self.report(current, total, subject, SubjectPhase::Fetching);
        let outcome = fetch_all(&self.source, subject, &self.options.fetch);

        if outcome.records.is_empty() {
            tracing::warn!(%subject, reason = %outcome.stop, "No edits found, skipping");
            self.report(current, total, subject, SubjectPhase::Skipped);
            state.reports.push(SubjectReport {
                subject: subject.clone(),
                edits: 0,
                pages: outcome.pages,
                stop: outcome.stop,
                output: None,
                phase: SubjectPhase::Skipped,
            });
            return;
        }

        let result = SubjectResult::new(subject.clone(), outcome.records);

        self.report(current, total, subject, SubjectPhase::Exporting);
        let path = self
            .options
            .output_dir
            .join(self.options.naming.subject_file(subject, self.options.format));
        let output = match self.exporter.write_subject(&result, &path) {
            Ok(()) => {
                tracing::info!(%subject, path = %path.display(), "Export saved");
                Some(path)
            }
            Err(e) => {
                tracing::warn!(%subject, error = %e, "Export failed");
                state.failures.push(RunFailure::new(subject.name(), e.to_string()));
                None
            }
        };

        self.report(current, total, subject, SubjectPhase::Aggregating);
        let edits = result.total();
        state.absorb(result);

        self.report(current, total, subject, SubjectPhase::Done);
        state.reports.push(SubjectReport {
            subject: subject.clone(),
            edits,
            pages: outcome.pages,
            stop: outcome.stop,
            output,
            phase: SubjectPhase::Done,
        });
    }

    fn write_consolidated(&self, state: &mut RunState) {
        let path = self
            .options
            .output_dir
            .join(FileNaming::consolidated_file(self.options.format));
        match self.exporter.write_consolidated(&state.results, &path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Consolidated report saved");
                state.consolidated_path = Some(path);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to write consolidated report");
                state
                    .failures
                    .push(RunFailure::new(path.display().to_string(), e.to_string()));
            }
        }
    }

    fn write_summary(&self, state: &mut RunState, options: &SummaryOptions, subjects: &[Subject]) {
        let kind = subjects
            .first()
            .map_or(SubjectKind::Article, Subject::kind);
        let path = self.options.output_dir.join(&options.file_name);
        match state.summary(&options.label, kind).write_to(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Combined edit counts saved");
                state.summary_path = Some(path);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to write combined edit counts");
                state
                    .failures
                    .push(RunFailure::new(path.display().to_string(), e.to_string()));
            }
        }
    }

    fn report(&self, current: usize, total: usize, subject: &Subject, phase: SubjectPhase) {
        if let Some(ref callback) = self.progress_callback {
            callback(RunProgress {
                current,
                total,
                subject: subject.name().to_string(),
                phase,
            });
        }
    }
}
