//! HTTP transport

use std::time::Duration;

use crate::error::{Error, Result};

/// HTTP client abstraction for dependency injection.
pub trait HttpClient {
    /// Perform a GET request with the given query pairs and return the response body.
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<String>;
}

/// Production HTTP client using blocking reqwest.
///
/// The user agent is attached to every request; MediaWiki rejects
/// anonymous clients.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent.to_string())
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<String> {
        let response = self.client.get(url).query(query).send().map_err(|e| {
            let message = if e.is_timeout() {
                "request timed out".to_string()
            } else if e.is_connect() {
                "connection failed".to_string()
            } else {
                e.to_string()
            };
            Error::Transport {
                url: url.to_string(),
                message,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| Error::Transport {
            url: url.to_string(),
            message: format!("failed to read response body: {e}"),
        })
    }
}
