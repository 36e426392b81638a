//! Combined summary across all subjects of a run

use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::{SubjectKind, SubjectResult};

use super::counter::{EditorCount, EditorCounter};

/// Edits retrieved for one subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectTotal {
    pub subject: String,
    pub edits: usize,
}

/// Totals, per-subject breakdown and full editor ranking of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// What the run was about, e.g. "Political Figures"
    pub label: String,
    pub kind: SubjectKind,
    pub subjects: Vec<SubjectTotal>,
    pub unique_editors: usize,
    pub total_edits: usize,
    pub ranking: Vec<EditorCount>,
}

impl RunSummary {
    pub fn new(
        label: impl Into<String>,
        kind: SubjectKind,
        results: &[SubjectResult],
        counter: &EditorCounter,
    ) -> Self {
        Self {
            label: label.into(),
            kind,
            subjects: results
                .iter()
                .map(|r| SubjectTotal {
                    subject: r.subject.name().to_string(),
                    edits: r.total(),
                })
                .collect(),
            unique_editors: counter.unique_editors(),
            total_edits: counter.total(),
            ranking: counter.ranked(),
        }
    }

    /// The `n` most active editors
    pub fn top(&self, n: usize) -> &[EditorCount] {
        &self.ranking[..n.min(self.ranking.len())]
    }

    fn nouns(&self) -> (&'static str, &'static str, &'static str) {
        match self.kind {
            SubjectKind::Article => ("articles", "Articles", "revisions"),
            SubjectKind::User => ("users", "Users", "edits"),
        }
    }

    /// Render the plain-text summary report
    pub fn render_text(&self) -> String {
        let (plural, heading, unit) = self.nouns();
        let title = format!("Wikipedia Edit Counts for {}", self.label);

        let mut out = String::new();
        let _ = writeln!(out, "{}", title);
        let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
        out.push('\n');

        let _ = writeln!(out, "Total {} analyzed: {}", plural, self.subjects.len());
        let _ = writeln!(out, "Total unique editors: {}", self.unique_editors);
        let _ = writeln!(out, "Total edits across all {}: {}", plural, self.total_edits);
        out.push('\n');

        let _ = writeln!(out, "{} Summary:", heading);
        for total in &self.subjects {
            let _ = writeln!(out, "  {}: {} {}", total.subject, total.edits, unit);
        }

        let by_user = format!("Edit counts by user across all {}:", plural);
        let _ = writeln!(out, "\n\n{}", by_user);
        let _ = writeln!(out, "{}", "-".repeat(by_user.chars().count()));
        for entry in &self.ranking {
            let _ = writeln!(out, "{}: {}", entry.editor, entry.edits);
        }
        out
    }

    /// Write the plain-text report to `path`
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render_text()).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{EditRecord, Subject};

    fn result(name: &str, editors: &[&str]) -> SubjectResult {
        SubjectResult::new(
            Subject::Article(name.to_string()),
            editors
                .iter()
                .enumerate()
                .map(|(i, e)| EditRecord {
                    timestamp: "2024-01-01T00:00:00Z".to_string(),
                    editor: e.to_string(),
                    page_title: name.to_string(),
                    page_id: 1,
                    revision_id: i as u64,
                    size_delta: 0,
                    comment: String::new(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_render_text() {
        let results = vec![result("Joe Biden", &["A", "B", "A"]), result("Xi Jinping", &["B"])];
        let mut counter = EditorCounter::new();
        for r in &results {
            counter.merge(&r.records);
        }

        let summary = RunSummary::new("Political Figures", SubjectKind::Article, &results, &counter);
        let text = summary.render_text();

        assert!(text.starts_with("Wikipedia Edit Counts for Political Figures\n===="));
        assert!(text.contains("Total articles analyzed: 2\n"));
        assert!(text.contains("Total unique editors: 2\n"));
        assert!(text.contains("Total edits across all articles: 4\n"));
        assert!(text.contains("  Joe Biden: 3 revisions\n"));
        assert!(text.contains("  Xi Jinping: 1 revisions\n"));
        assert!(text.ends_with("A: 2\nB: 2\n"));
    }

    #[test]
    fn test_top_clamps() {
        let results = vec![result("P", &["A"])];
        let mut counter = EditorCounter::new();
        counter.merge(&results[0].records);
        let summary = RunSummary::new("x", SubjectKind::User, &results, &counter);
        assert_eq!(summary.top(20).len(), 1);
        assert!(summary.render_text().contains("Total users analyzed: 1"));
    }
}
