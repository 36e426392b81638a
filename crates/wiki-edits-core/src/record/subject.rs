//! Subjects: the article or user whose edits are queried

use std::fmt;

use serde::{Deserialize, Serialize};

/// What kind of subject a run is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    /// Revision history of an article
    Article,
    /// Contributions of a registered user
    User,
}

impl SubjectKind {
    /// Build a subject of this kind
    pub fn subject(self, name: impl Into<String>) -> Subject {
        match self {
            SubjectKind::Article => Subject::Article(name.into()),
            SubjectKind::User => Subject::User(name.into()),
        }
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectKind::Article => write!(f, "article"),
            SubjectKind::User => write!(f, "user"),
        }
    }
}

/// An article title or a username
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Subject {
    Article(String),
    User(String),
}

impl Subject {
    pub fn name(&self) -> &str {
        match self {
            Subject::Article(name) | Subject::User(name) => name,
        }
    }

    pub fn kind(&self) -> SubjectKind {
        match self {
            Subject::Article(_) => SubjectKind::Article,
            Subject::User(_) => SubjectKind::User,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
