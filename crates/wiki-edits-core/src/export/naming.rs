//! Output file naming presets

use crate::record::Subject;

use super::ExportFormat;

/// Base name of the consolidated report
pub const CONSOLIDATED_STEM: &str = "consolidated_report";

/// How per-subject files are named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileNaming {
    /// `<subject>_edits.<ext>`
    #[default]
    Edits,
    /// `<lowercase_subject>_wikipedia_edit_history.<ext>`
    EditHistory,
}

impl FileNaming {
    /// File name for one subject's export
    pub fn subject_file(&self, subject: &Subject, format: ExportFormat) -> String {
        let stem = match self {
            FileNaming::Edits => format!("{}_edits", sanitize_filename(subject.name())),
            FileNaming::EditHistory => format!(
                "{}_wikipedia_edit_history",
                sanitize_filename(&subject.name().to_lowercase().replace(' ', "_"))
            ),
        };
        format!("{}.{}", stem, format.extension())
    }

    /// File name for the consolidated report
    pub fn consolidated_file(format: ExportFormat) -> String {
        format!("{}.{}", CONSOLIDATED_STEM, format.extension())
    }
}

/// Replace characters that are not allowed in file names
pub fn sanitize_filename(name: &str) -> String {
    let cleaned = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string();
    match cleaned.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => cleaned,
    }
}
