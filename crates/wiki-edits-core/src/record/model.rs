//! Data models for fetched edits

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::subject::Subject;

/// Editor name used when the API hides or omits the user
pub const ANONYMOUS: &str = "Anonymous";

/// Timestamp layout used by the MediaWiki API
const API_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Timestamp layout used in text and CSV exports
const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single edit (revision) of a wiki page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRecord {
    /// ISO-8601 timestamp as returned by the API
    pub timestamp: String,
    /// Display name of the user credited with the edit
    pub editor: String,
    /// Title of the edited page
    pub page_title: String,
    /// Page identifier
    pub page_id: u64,
    /// Revision identifier
    pub revision_id: u64,
    /// Signed byte-count change made by the edit
    #[serde(default)]
    pub size_delta: i64,
    /// Edit summary
    #[serde(default)]
    pub comment: String,
}

impl EditRecord {
    /// Timestamp reformatted for display, or the raw value if it cannot be parsed
    pub fn display_timestamp(&self) -> String {
        NaiveDateTime::parse_from_str(&self.timestamp, API_TIMESTAMP_FORMAT)
            .map(|t| t.format(DISPLAY_TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|_| self.timestamp.clone())
    }

    /// Size delta with an explicit sign for growth (`+12`, `0`, `-4`)
    pub fn size_display(&self) -> String {
        if self.size_delta > 0 {
            format!("+{}", self.size_delta)
        } else {
            self.size_delta.to_string()
        }
    }

    /// Comment cut down to at most `max` characters, ending in `...` when cut
    pub fn short_comment(&self, max: usize) -> String {
        if self.comment.chars().count() <= max {
            return self.comment.clone();
        }
        let keep = max.saturating_sub(3);
        let mut out: String = self.comment.chars().take(keep).collect();
        out.push_str("...");
        out
    }
}

/// Opaque continuation parameters handed out by the server.
///
/// Every pair is sent back verbatim on the next request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContinuationToken(BTreeMap<String, String>);

impl ContinuationToken {
    /// Query parameters to append to the next request
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ContinuationToken {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// All edits fetched for one subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectResult {
    pub subject: Subject,
    pub records: Vec<EditRecord>,
}

impl SubjectResult {
    pub fn new(subject: Subject, records: Vec<EditRecord>) -> Self {
        Self { subject, records }
    }

    /// Number of edits retrieved
    pub fn total(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timestamp: &str, size_delta: i64, comment: &str) -> EditRecord {
        EditRecord {
            timestamp: timestamp.to_string(),
            editor: "Alice".to_string(),
            page_title: "Rust".to_string(),
            page_id: 1,
            revision_id: 2,
            size_delta,
            comment: comment.to_string(),
        }
    }

    #[test]
    fn test_display_timestamp() {
        let rec = record("2024-03-05T14:07:09Z", 0, "");
        assert_eq!(rec.display_timestamp(), "2024-03-05 14:07:09");
    }

    #[test]
    fn test_display_timestamp_keeps_unparsable_value() {
        let rec = record("yesterday", 0, "");
        assert_eq!(rec.display_timestamp(), "yesterday");
    }

    #[test]
    fn test_size_display() {
        assert_eq!(record("", 12, "").size_display(), "+12");
        assert_eq!(record("", 0, "").size_display(), "0");
        assert_eq!(record("", -4, "").size_display(), "-4");
    }

    #[test]
    fn test_short_comment() {
        let long = "x".repeat(61);
        let cut = record("", 0, &long).short_comment(60);
        assert_eq!(cut.chars().count(), 60);
        assert!(cut.ends_with("..."));

        let exact = "y".repeat(60);
        assert_eq!(record("", 0, &exact).short_comment(60), exact);
    }

    #[test]
    fn test_missing_optional_fields_default_on_deserialize() {
        let json = r#"{
            "timestamp": "2024-01-01T00:00:00Z",
            "editor": "Bob",
            "page_title": "Page",
            "page_id": 10,
            "revision_id": 20
        }"#;
        let rec: EditRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.size_delta, 0);
        assert_eq!(rec.comment, "");
    }

    #[test]
    fn test_continuation_params_are_sorted() {
        let token: ContinuationToken =
            [("uccontinue", "20240101|5"), ("continue", "-||")].into_iter().collect();
        let params: Vec<_> = token.params().collect();
        assert_eq!(params, vec![("continue", "-||"), ("uccontinue", "20240101|5")]);
        assert_eq!(token.get("uccontinue"), Some("20240101|5"));
    }
}
