//! CSV export

use std::path::Path;

use crate::error::Result;
use crate::record::{EditRecord, SubjectResult};

use super::{create_file, write_error, ExportFormat, Exporter};

/// Fixed column names, always written as the first row
pub const CSV_HEADER: [&str; 7] = [
    "Username",
    "Timestamp",
    "Page Title",
    "Page ID",
    "Revision ID",
    "Size Change",
    "Comment",
];

/// Tabular export, one row per edit
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl CsvExporter {
    fn row(record: &EditRecord) -> [String; 7] {
        [
            record.editor.clone(),
            record.display_timestamp(),
            record.page_title.clone(),
            record.page_id.to_string(),
            record.revision_id.to_string(),
            record.size_delta.to_string(),
            record.comment.clone(),
        ]
    }

    fn write_table<'a>(
        path: &Path,
        records: impl Iterator<Item = &'a EditRecord>,
    ) -> Result<()> {
        let mut writer = csv::Writer::from_writer(create_file(path)?);
        writer.write_record(CSV_HEADER)?;
        for record in records {
            writer.write_record(Self::row(record))?;
        }
        writer.flush().map_err(write_error(path))?;
        Ok(())
    }
}

impl Exporter for CsvExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn write_subject(&self, result: &SubjectResult, path: &Path) -> Result<()> {
        Self::write_table(path, result.records.iter())
    }

    fn write_consolidated(&self, results: &[SubjectResult], path: &Path) -> Result<()> {
        Self::write_table(path, results.iter().flat_map(|r| r.records.iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Subject;
    use tempfile::TempDir;

    fn record(editor: &str, revision_id: u64, comment: &str) -> EditRecord {
        EditRecord {
            timestamp: "2023-12-31T23:59:59Z".to_string(),
            editor: editor.to_string(),
            page_title: "Page, with comma".to_string(),
            page_id: 7,
            revision_id,
            size_delta: -12,
            comment: comment.to_string(),
        }
    }

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("u_edits.csv");
        let result = SubjectResult::new(
            Subject::User("u".to_string()),
            vec![record("u", 1, "said \"hi\""), record("u", 2, "")],
        );

        CsvExporter.write_subject(&result, &path).unwrap();
        let rows = read_rows(&path);

        assert_eq!(rows.len(), result.total() + 1);
        assert_eq!(rows[0], CSV_HEADER);
        assert_eq!(
            rows[1],
            vec!["u", "2023-12-31 23:59:59", "Page, with comma", "7", "1", "-12", "said \"hi\""]
        );
    }

    #[test]
    fn test_empty_result_still_has_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        CsvExporter
            .write_subject(&SubjectResult::new(Subject::User("x".to_string()), vec![]), &path)
            .unwrap();
        assert_eq!(read_rows(&path), vec![CSV_HEADER.to_vec()]);
    }

    #[test]
    fn test_consolidated_is_one_flat_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("consolidated_report.csv");
        let results = vec![
            SubjectResult::new(Subject::User("a".to_string()), vec![record("a", 1, "")]),
            SubjectResult::new(
                Subject::User("b".to_string()),
                vec![record("b", 2, ""), record("b", 3, "")],
            ),
        ];

        CsvExporter.write_consolidated(&results, &path).unwrap();
        let rows = read_rows(&path);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], CSV_HEADER);
        assert_eq!(rows[1][0], "a");
        assert_eq!(rows[3][0], "b");
    }
}
