//! Plain-text export

use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::record::{EditRecord, SubjectKind, SubjectResult};

use super::{create_file, export_date_display, write_error, ExportFormat, Exporter};

/// Longest comment shown on a text line
const MAX_COMMENT_CHARS: usize = 60;

/// Human-readable export, one line per edit
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExporter;

impl TextExporter {
    /// Format a single edit for display
    pub fn format_line(index: usize, record: &EditRecord) -> String {
        format!(
            "{}. {} | {} | {} | {} bytes | {}",
            index,
            record.display_timestamp(),
            record.editor,
            record.page_title,
            record.size_display(),
            record.short_comment(MAX_COMMENT_CHARS)
        )
    }

    fn write_records(out: &mut impl Write, records: &[EditRecord]) -> std::io::Result<()> {
        for (i, record) in records.iter().enumerate() {
            writeln!(out, "{}", Self::format_line(i + 1, record))?;
        }
        Ok(())
    }
}

fn kind_label(kind: SubjectKind) -> &'static str {
    match kind {
        SubjectKind::Article => "article",
        SubjectKind::User => "user",
    }
}

fn plural_label(results: &[SubjectResult]) -> &'static str {
    let mut kinds = results.iter().map(|r| r.subject.kind());
    match kinds.next() {
        Some(first) if kinds.all(|k| k == first) => match first {
            SubjectKind::Article => "articles",
            SubjectKind::User => "users",
        },
        _ => "subjects",
    }
}

impl Exporter for TextExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Txt
    }

    fn write_subject(&self, result: &SubjectResult, path: &Path) -> Result<()> {
        let mut out = create_file(path)?;
        let write = |out: &mut std::io::BufWriter<std::fs::File>| -> std::io::Result<()> {
            writeln!(
                out,
                "Edit history for Wikipedia {}: {}",
                kind_label(result.subject.kind()),
                result.subject
            )?;
            writeln!(out, "Total edits retrieved: {}", result.total())?;
            writeln!(out, "Export date: {}", export_date_display())?;
            writeln!(out)?;
            Self::write_records(out, &result.records)?;
            out.flush()
        };
        write(&mut out).map_err(write_error(path))
    }

    fn write_consolidated(&self, results: &[SubjectResult], path: &Path) -> Result<()> {
        let mut out = create_file(path)?;
        let write = |out: &mut std::io::BufWriter<std::fs::File>| -> std::io::Result<()> {
            writeln!(out, "WIKIPEDIA EDIT HISTORY - CONSOLIDATED REPORT")?;
            writeln!(out, "Generated: {}", export_date_display())?;
            writeln!(out, "Total {} analyzed: {}", plural_label(results), results.len())?;
            writeln!(out)?;

            for result in results {
                writeln!(
                    out,
                    "=== {}: {} ===",
                    kind_label(result.subject.kind()).to_uppercase(),
                    result.subject
                )?;
                writeln!(out, "Total edits retrieved: {}", result.total())?;
                writeln!(out)?;
                Self::write_records(out, &result.records)?;
                writeln!(out, "\n")?;
            }
            out.flush()
        };
        write(&mut out).map_err(write_error(path))
    }
}
