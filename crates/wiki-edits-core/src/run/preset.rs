//! Run presets for the two kinds of subjects

use std::time::Duration;

use crate::api::FetchOptions;
use crate::config::Config;
use crate::export::{ExportFormat, FileNaming};
use crate::record::{Subject, SubjectKind};

use super::engine::{RunOptions, SummaryOptions};

/// Articles analysed when none are given
pub const POLITICAL_FIGURES: [&str; 10] = [
    "Barack Obama",
    "Joe Biden",
    "Donald Trump",
    "Kamala Harris",
    "Vladimir Putin",
    "Xi Jinping",
    "Emmanuel Macron",
    "Rishi Sunak",
    "Narendra Modi",
    "Justin Trudeau",
];

/// Default settings for article histories and user contributions.
///
/// Both presets share one engine and one set of exporters; they differ only
/// in file naming, defaults and whether a combined summary is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPreset {
    /// Full revision history of articles, summarised across all of them
    ArticleHistory,
    /// Recent contributions of individual users
    UserContributions,
}

impl RunPreset {
    pub fn kind(&self) -> SubjectKind {
        match self {
            RunPreset::ArticleHistory => SubjectKind::Article,
            RunPreset::UserContributions => SubjectKind::User,
        }
    }

    pub fn naming(&self) -> FileNaming {
        match self {
            RunPreset::ArticleHistory => FileNaming::EditHistory,
            RunPreset::UserContributions => FileNaming::Edits,
        }
    }

    pub fn default_format(&self) -> ExportFormat {
        match self {
            RunPreset::ArticleHistory => ExportFormat::Json,
            RunPreset::UserContributions => ExportFormat::Csv,
        }
    }

    /// Per-subject record cap when the caller does not give one
    pub fn default_cap(&self) -> Option<usize> {
        match self {
            RunPreset::ArticleHistory => None,
            RunPreset::UserContributions => Some(50),
        }
    }

    pub fn default_summary(&self) -> Option<SummaryOptions> {
        match self {
            RunPreset::ArticleHistory => Some(SummaryOptions {
                file_name: "political_figures_edit_counts.txt".to_string(),
                label: "Political Figures".to_string(),
            }),
            RunPreset::UserContributions => None,
        }
    }

    /// Build subjects of this preset's kind
    pub fn subjects<I, T>(&self, names: I) -> Vec<Subject>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let kind = self.kind();
        names.into_iter().map(|n| kind.subject(n)).collect()
    }

    /// Run options from this preset's defaults and the config
    pub fn options(&self, config: &Config) -> RunOptions {
        RunOptions {
            fetch: FetchOptions {
                cap: self.default_cap(),
                page_delay: config.page_delay(),
            },
            subject_delay: config.subject_delay(),
            output_dir: config.output_dir.clone(),
            format: self.default_format(),
            naming: self.naming(),
            consolidated: false,
            summary: self.default_summary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_preset() {
        let config = Config::default();
        let options = RunPreset::ArticleHistory.options(&config);
        assert_eq!(options.naming, FileNaming::EditHistory);
        assert_eq!(options.format, ExportFormat::Json);
        assert_eq!(options.fetch.cap, None);
        assert_eq!(
            options.summary.unwrap().file_name,
            "political_figures_edit_counts.txt"
        );
    }

    #[test]
    fn test_user_preset() {
        let config = Config {
            page_delay_ms: 5,
            ..Default::default()
        };
        let options = RunPreset::UserContributions.options(&config);
        assert_eq!(options.naming, FileNaming::Edits);
        assert_eq!(options.format, ExportFormat::Csv);
        assert_eq!(options.fetch.cap, Some(50));
        assert_eq!(options.fetch.page_delay, Duration::from_millis(5));
        assert!(options.summary.is_none());
    }

    #[test]
    fn test_subjects_use_preset_kind() {
        let subjects = RunPreset::ArticleHistory.subjects(POLITICAL_FIGURES);
        assert_eq!(subjects.len(), 10);
        assert!(subjects.iter().all(|s| matches!(s, Subject::Article(_))));
    }
}
