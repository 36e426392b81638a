//! Wire format of `action=query` responses and conversion into records

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::record::{ContinuationToken, EditRecord, ANONYMOUS};

use super::client::ActiveUser;

#[derive(Debug, Deserialize, Default)]
pub(crate) struct QueryResponse {
    #[serde(default)]
    pub query: Option<QueryPayload>,
    #[serde(default, rename = "continue")]
    pub continuation: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct ApiError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub info: String,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct QueryPayload {
    /// Keyed by page id (`"-1"` for missing pages)
    #[serde(default)]
    pub pages: BTreeMap<String, PageItem>,
    #[serde(default)]
    pub usercontribs: Vec<ContribItem>,
    #[serde(default)]
    pub allusers: Vec<AllUsersItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageItem {
    #[serde(default)]
    pub pageid: Option<u64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub missing: Option<Value>,
    #[serde(default)]
    pub revisions: Vec<RevisionItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RevisionItem {
    pub revid: u64,
    pub timestamp: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    /// Page size in bytes after this revision
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContribItem {
    pub pageid: u64,
    pub revid: u64,
    pub title: String,
    pub timestamp: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub sizediff: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AllUsersItem {
    pub name: String,
    #[serde(default)]
    pub editcount: u64,
}

impl QueryResponse {
    /// Parse a response body, turning an API-level `error` object into [`Error::Api`]
    pub fn parse(body: &str) -> Result<Self> {
        let response: QueryResponse =
            serde_json::from_str(body).map_err(|e| Error::Parse(e.to_string()))?;
        if let Some(error) = response.error {
            return Err(Error::Api {
                code: if error.code.is_empty() {
                    "unknown_error".to_string()
                } else {
                    error.code
                },
                info: error.info,
            });
        }
        Ok(response)
    }

    /// Continuation token for the next request, if the server announced one
    pub fn next_token(&self) -> Option<ContinuationToken> {
        let params = self.continuation.as_ref()?;
        let token: ContinuationToken = params
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), value)
            })
            .collect();
        (!token.is_empty()).then_some(token)
    }

    /// Records from a `prop=revisions` response.
    ///
    /// Revisions arrive newest first, so each delta is the revision's size
    /// minus the size of the one listed after it. The last revision in the
    /// batch gets 0 until the next batch supplies its predecessor, see
    /// [`QueryResponse::revision_sizes`].
    pub fn revision_records(&self) -> Vec<EditRecord> {
        let Some(query) = &self.query else {
            return Vec::new();
        };
        query
            .pages
            .values()
            .filter(|page| page.missing.is_none())
            .flat_map(|page| {
                let page_id = page.pageid.unwrap_or_default();
                page.revisions.iter().enumerate().map(move |(i, rev)| {
                    let older = page.revisions.get(i + 1).and_then(|r| r.size);
                    EditRecord {
                        timestamp: rev.timestamp.clone(),
                        editor: editor_or_anonymous(rev.user.as_deref()),
                        page_title: page.title.clone(),
                        page_id,
                        revision_id: rev.revid,
                        size_delta: size_delta(rev.size, older),
                        comment: rev.comment.clone().unwrap_or_default(),
                    }
                })
            })
            .collect()
    }

    /// Sizes of the newest and oldest revision in a `prop=revisions` batch
    pub fn revision_sizes(&self) -> (Option<u64>, Option<u64>) {
        let revisions = self
            .query
            .as_ref()
            .and_then(|q| q.pages.values().find(|p| p.missing.is_none()))
            .map(|p| p.revisions.as_slice())
            .unwrap_or_default();
        (
            revisions.first().and_then(|r| r.size),
            revisions.last().and_then(|r| r.size),
        )
    }

    /// Records from a `list=usercontribs` response
    pub fn contrib_records(&self) -> Vec<EditRecord> {
        let Some(query) = &self.query else {
            return Vec::new();
        };
        query
            .usercontribs
            .iter()
            .map(|c| EditRecord {
                timestamp: c.timestamp.clone(),
                editor: editor_or_anonymous(c.user.as_deref()),
                page_title: c.title.clone(),
                page_id: c.pageid,
                revision_id: c.revid,
                size_delta: c.sizediff.unwrap_or(0),
                comment: c.comment.clone().unwrap_or_default(),
            })
            .collect()
    }

    /// Users from a `list=allusers` response
    pub fn active_users(&self) -> Vec<ActiveUser> {
        let Some(query) = &self.query else {
            return Vec::new();
        };
        query
            .allusers
            .iter()
            .map(|u| ActiveUser {
                name: u.name.clone(),
                edit_count: u.editcount,
            })
            .collect()
    }
}

/// Byte change from `older` to `newer`; 0 when either size is unknown
pub(crate) fn size_delta(newer: Option<u64>, older: Option<u64>) -> i64 {
    match (newer, older) {
        (Some(newer), Some(older)) => newer as i64 - older as i64,
        _ => 0,
    }
}

/// Hidden, missing and blank user names are all credited to [`ANONYMOUS`]
fn editor_or_anonymous(user: Option<&str>) -> String {
    match user.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => ANONYMOUS.to_string(),
    }
}
