//! Run configuration and config file handling

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default MediaWiki endpoint
pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Default client-identifying header value
pub const DEFAULT_USER_AGENT: &str =
    concat!("WikiEditHistoryFetcher/", env!("CARGO_PKG_VERSION"), " (educational project)");

/// Configuration for wiki-edits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Query endpoint (`api.php`)
    pub api_url: String,
    /// Sent as the `User-Agent` header on every request
    pub user_agent: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Pause between successive page requests for one subject
    pub page_delay_ms: u64,
    /// Pause between subjects
    pub subject_delay_ms: u64,
    /// Where exported files are written
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            page_delay_ms: 1000,
            subject_delay_ms: 1000,
            output_dir: PathBuf::from("wiki_edits"),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("wiki-edits").join("config.json"))
    }

    /// Load config from the default location, falling back to defaults if not found
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| std::fs::read_to_string(&path).ok())
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Load config from an explicit file. Unlike [`Config::load`], a missing
    /// or malformed file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            Error::Config(format!("Invalid config {}: {}", path.display(), e))
        })
    }

    /// Check the values a run depends on
    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "API URL must start with http:// or https://: {}",
                self.api_url
            )));
        }
        if self.user_agent.trim().is_empty() {
            return Err(Error::Config("User agent must not be empty".to_string()));
        }
        if self.page_delay_ms == 0 {
            return Err(Error::Config(
                "Page delay must be at least 1 ms to respect API rate limits".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("Request timeout must be positive".to_string()));
        }
        Ok(())
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn subject_delay(&self) -> Duration {
        Duration::from_millis(self.subject_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Create the output directory, failing if it cannot be written
    pub fn prepare_output_dir(&self) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            Error::Config(format!(
                "Cannot create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;
        let meta = std::fs::metadata(&self.output_dir)?;
        if meta.permissions().readonly() {
            return Err(Error::Config(format!(
                "Output directory is not writable: {}",
                self.output_dir.display()
            )));
        }
        Ok(self.output_dir.clone())
    }
}
