//! File exporters for fetched edits
//!
//! All three formats implement [`Exporter`]; [`ExportFormat::exporter`] picks
//! the implementation. File names come from a [`FileNaming`] preset.

mod json;
mod naming;
mod tabular;
mod text;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::Local;

use crate::error::{Error, Result};
use crate::record::SubjectResult;

pub use json::{read_consolidated_json, read_subject_json, ConsolidatedDocument, JsonExporter, SubjectDocument, SubjectSection};
pub use naming::{sanitize_filename, FileNaming, CONSOLIDATED_STEM};
pub use tabular::{CsvExporter, CSV_HEADER};
pub use text::TextExporter;

/// Writes subject results to a destination file
pub trait Exporter {
    /// The format this exporter produces
    fn format(&self) -> ExportFormat;

    /// Write one subject's edits to `path`
    fn write_subject(&self, result: &SubjectResult, path: &Path) -> Result<()>;

    /// Write all subjects into a single report at `path`
    fn write_consolidated(&self, results: &[SubjectResult], path: &Path) -> Result<()>;
}

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Txt,
    #[default]
    Csv,
    Json,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Txt => write!(f, "TXT"),
            ExportFormat::Csv => write!(f, "CSV"),
            ExportFormat::Json => write!(f, "JSON"),
        }
    }
}

impl ExportFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// The exporter implementing this format
    pub fn exporter(&self) -> Box<dyn Exporter> {
        match self {
            ExportFormat::Txt => Box::new(TextExporter),
            ExportFormat::Csv => Box::new(CsvExporter),
            ExportFormat::Json => Box::new(JsonExporter),
        }
    }
}

/// Open `path` for writing, tagging failures with the path
pub(crate) fn create_file(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
}

pub(crate) fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// Local time of export, as shown in text reports
pub(crate) fn export_date_display() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Local time of export, as stored in JSON documents
pub(crate) fn export_date_iso() -> String {
    Local::now().to_rfc3339()
}
