//! MediaWiki client

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Result;
use crate::record::{ContinuationToken, EditRecord, Subject};

use super::http::{HttpClient, ReqwestClient};
use super::response::QueryResponse;

/// Largest page the API serves to unprivileged clients
pub const MAX_PAGE_SIZE: usize = 500;

const REVISION_PROPS: &str = "timestamp|user|comment|ids|size";
const CONTRIB_PROPS: &str = "ids|title|timestamp|comment|size|sizediff|flags";

/// One page of edits plus the cursor for the next one
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub records: Vec<EditRecord>,
    /// `None` once the server has no more data
    pub next: Option<ContinuationToken>,
    /// Page size after the first (newest) revision in the batch, for article histories
    pub newest_size: Option<u64>,
    /// Page size after the last (oldest) revision in the batch
    pub oldest_size: Option<u64>,
}

/// A user returned by active-user discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveUser {
    pub name: String,
    pub edit_count: u64,
}

/// Anything that can serve edits one page at a time
pub trait EditSource {
    /// Fetch a single page of at most `limit` edits (clamped to [`MAX_PAGE_SIZE`]).
    ///
    /// Performs one network round trip.
    fn fetch_page(
        &self,
        subject: &Subject,
        continuation: Option<&ContinuationToken>,
        limit: usize,
    ) -> Result<Page>;
}

/// Client for a MediaWiki `api.php` endpoint
pub struct WikiClient<H = ReqwestClient> {
    http: H,
    api_url: String,
}

impl WikiClient<ReqwestClient> {
    /// Create a client using the endpoint, user agent and timeout from `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = ReqwestClient::new(&config.user_agent, config.timeout())?;
        Ok(Self::with_http(http, config.api_url.clone()))
    }
}

impl<H: HttpClient> WikiClient<H> {
    /// Create a client over a custom transport
    pub fn with_http(http: H, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
        }
    }

    /// Find users with at least `min_edits` edits, returning at most `max_users`
    pub fn find_active_users(&self, min_edits: u64, max_users: usize) -> Result<Vec<ActiveUser>> {
        let params = vec![
            param("action", "query"),
            param("format", "json"),
            param("list", "allusers"),
            param("aulimit", max_users.clamp(1, MAX_PAGE_SIZE).to_string()),
            param("auwitheditsonly", "true"),
            param("auminedits", min_edits.to_string()),
            param("auprop", "editcount"),
        ];
        let response = self.query(&params)?;
        let mut users = response.active_users();
        users.truncate(max_users);
        Ok(users)
    }

    fn query(&self, params: &[(String, String)]) -> Result<QueryResponse> {
        tracing::debug!(url = %self.api_url, ?params, "API request");
        let body = self.http.get(&self.api_url, params)?;
        QueryResponse::parse(&body)
    }
}

impl<H: HttpClient> EditSource for WikiClient<H> {
    fn fetch_page(
        &self,
        subject: &Subject,
        continuation: Option<&ContinuationToken>,
        limit: usize,
    ) -> Result<Page> {
        let limit = limit.clamp(1, MAX_PAGE_SIZE).to_string();
        let mut params = vec![param("action", "query"), param("format", "json")];
        match subject {
            Subject::Article(title) => {
                params.push(param("titles", title.as_str()));
                params.push(param("prop", "revisions"));
                params.push(param("rvprop", REVISION_PROPS));
                params.push(param("rvlimit", limit));
            }
            Subject::User(name) => {
                params.push(param("list", "usercontribs"));
                params.push(param("ucuser", name.as_str()));
                params.push(param("uclimit", limit));
                params.push(param("ucprop", CONTRIB_PROPS));
            }
        }
        if let Some(token) = continuation {
            for (key, value) in token.params() {
                params.retain(|(k, _)| k != key);
                params.push(param(key, value));
            }
        }

        let response = self.query(&params)?;
        let (records, (newest_size, oldest_size)) = match subject {
            Subject::Article(_) => (response.revision_records(), response.revision_sizes()),
            Subject::User(_) => (response.contrib_records(), (None, None)),
        };
        Ok(Page {
            records,
            next: response.next_token(),
            newest_size,
            oldest_size,
        })
    }
}

fn param(key: &str, value: impl Into<String>) -> (String, String) {
    (key.to_string(), value.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::RefCell;

    /// Replays canned bodies and records every query it receives
    struct CannedHttp {
        bodies: RefCell<Vec<String>>,
        seen: RefCell<Vec<Vec<(String, String)>>>,
    }

    impl CannedHttp {
        fn new(bodies: &[&str]) -> Self {
            Self {
                bodies: RefCell::new(bodies.iter().rev().map(|b| b.to_string()).collect()),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn value_of(&self, call: usize, key: &str) -> Option<String> {
            self.seen.borrow()[call]
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        }
    }

    impl HttpClient for &CannedHttp {
        fn get(&self, _url: &str, query: &[(String, String)]) -> Result<String> {
            self.seen.borrow_mut().push(query.to_vec());
            self.bodies
                .borrow_mut()
                .pop()
                .ok_or_else(|| Error::Transport {
                    url: "test".to_string(),
                    message: "no more responses".to_string(),
                })
        }
    }

    #[test]
    fn test_article_request_params() {
        let http = CannedHttp::new(&[r#"{ "query": { "pages": {} } }"#]);
        let client = WikiClient::with_http(&http, "https://example.org/w/api.php");

        let page = client
            .fetch_page(&Subject::Article("Rust".to_string()), None, 500)
            .unwrap();

        assert!(page.records.is_empty());
        assert!(page.next.is_none());
        assert_eq!(http.value_of(0, "titles").as_deref(), Some("Rust"));
        assert_eq!(http.value_of(0, "prop").as_deref(), Some("revisions"));
        assert_eq!(http.value_of(0, "rvlimit").as_deref(), Some("500"));
        assert_eq!(http.value_of(0, "rvprop").as_deref(), Some(REVISION_PROPS));
    }

    #[test]
    fn test_user_request_echoes_continuation() {
        let http = CannedHttp::new(&[
            r#"{ "continue": { "uccontinue": "20240101|9", "continue": "-||" },
                 "query": { "usercontribs": [
                   { "user": "Bob", "pageid": 1, "revid": 2, "title": "T",
                     "timestamp": "2024-01-01T00:00:00Z" } ] } }"#,
            r#"{ "query": { "usercontribs": [] } }"#,
        ]);
        let client = WikiClient::with_http(&http, "https://example.org/w/api.php");
        let subject = Subject::User("Bob".to_string());

        let first = client.fetch_page(&subject, None, 1000).unwrap();
        assert_eq!(first.records.len(), 1);
        assert_eq!(http.value_of(0, "uclimit").as_deref(), Some("500"));

        let token = first.next.unwrap();
        client.fetch_page(&subject, Some(&token), 20).unwrap();
        assert_eq!(http.value_of(1, "list").as_deref(), Some("usercontribs"));
        assert_eq!(http.value_of(1, "uccontinue").as_deref(), Some("20240101|9"));
        assert_eq!(http.value_of(1, "continue").as_deref(), Some("-||"));
        assert_eq!(http.value_of(1, "uclimit").as_deref(), Some("20"));
    }

    #[test]
    fn test_find_active_users() {
        let http = CannedHttp::new(&[r#"{ "query": { "allusers": [
            { "userid": 1, "name": "Alice", "editcount": 120 },
            { "userid": 2, "name": "Bob", "editcount": 75 }
        ] } }"#]);
        let client = WikiClient::with_http(&http, "https://example.org/w/api.php");

        let users = client.find_active_users(50, 5).unwrap();
        assert_eq!(
            users,
            vec![
                ActiveUser { name: "Alice".to_string(), edit_count: 120 },
                ActiveUser { name: "Bob".to_string(), edit_count: 75 },
            ]
        );
        assert_eq!(http.value_of(0, "auminedits").as_deref(), Some("50"));
        assert_eq!(http.value_of(0, "aulimit").as_deref(), Some("5"));
    }

    #[test]
    fn test_transport_error_propagates() {
        let http = CannedHttp::new(&[]);
        let client = WikiClient::with_http(&http, "https://example.org/w/api.php");
        let err = client
            .fetch_page(&Subject::User("x".to_string()), None, 10)
            .unwrap_err();
        assert!(err.is_fetch_error());
    }
}
