//! JSON export

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::record::{EditRecord, SubjectResult};

use super::{create_file, export_date_iso, write_error, ExportFormat, Exporter};

/// Serializable view of one subject for JSON export
#[derive(Serialize)]
struct SubjectExport<'a> {
    subject: &'a str,
    export_date: String,
    total_edits: usize,
    edits: &'a [EditRecord],
}

#[derive(Serialize)]
struct SectionExport<'a> {
    subject: &'a str,
    total_edits: usize,
    edits: &'a [EditRecord],
}

#[derive(Serialize)]
struct ConsolidatedExport<'a> {
    export_date: String,
    total_subjects: usize,
    subjects: Vec<SectionExport<'a>>,
}

/// A per-subject JSON export read back from disk
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubjectDocument {
    pub subject: String,
    pub export_date: String,
    pub total_edits: usize,
    pub edits: Vec<EditRecord>,
}

/// One subject inside a consolidated JSON report
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubjectSection {
    pub subject: String,
    pub total_edits: usize,
    pub edits: Vec<EditRecord>,
}

/// A consolidated JSON report read back from disk
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConsolidatedDocument {
    pub export_date: String,
    pub total_subjects: usize,
    pub subjects: Vec<SubjectSection>,
}

/// Read a per-subject JSON export
pub fn read_subject_json(path: &Path) -> Result<SubjectDocument> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Read a consolidated JSON report
pub fn read_consolidated_json(path: &Path) -> Result<ConsolidatedDocument> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Pretty-printed JSON export
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl JsonExporter {
    fn write_pretty(path: &Path, value: &impl Serialize) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        let mut file = create_file(path)?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.write_all(b"\n"))
            .and_then(|_| file.flush())
            .map_err(write_error(path))
    }
}

impl Exporter for JsonExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn write_subject(&self, result: &SubjectResult, path: &Path) -> Result<()> {
        let export = SubjectExport {
            subject: result.subject.name(),
            export_date: export_date_iso(),
            total_edits: result.total(),
            edits: &result.records,
        };
        Self::write_pretty(path, &export)
    }

    fn write_consolidated(&self, results: &[SubjectResult], path: &Path) -> Result<()> {
        let export = ConsolidatedExport {
            export_date: export_date_iso(),
            total_subjects: results.len(),
            subjects: results
                .iter()
                .map(|r| SectionExport {
                    subject: r.subject.name(),
                    total_edits: r.total(),
                    edits: &r.records,
                })
                .collect(),
        };
        Self::write_pretty(path, &export)
    }
}
