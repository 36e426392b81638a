//! Continuation-driven pagination

use std::fmt;
use std::thread;
use std::time::Duration;

use crate::record::{ContinuationToken, EditRecord, Subject};

use super::client::{EditSource, MAX_PAGE_SIZE};
use super::response::size_delta;

/// Limits for a single subject's fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Maximum number of records to keep; `None` fetches everything
    pub cap: Option<usize>,
    /// Pause between successive page requests
    pub page_delay: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            cap: None,
            page_delay: Duration::from_secs(1),
        }
    }
}

/// Why pagination stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The server returned no continuation token
    Exhausted,
    /// The caller's cap was reached
    CapReached,
    /// The server returned an empty batch
    EmptyPage,
    /// A request failed; records fetched before it are kept
    Failed(String),
}

impl StopReason {
    /// Whether a failed request cut the history short
    pub fn is_partial(&self) -> bool {
        matches!(self, StopReason::Failed(_))
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Exhausted => write!(f, "end of history"),
            StopReason::CapReached => write!(f, "edit limit reached"),
            StopReason::EmptyPage => write!(f, "empty page"),
            StopReason::Failed(e) => write!(f, "fetch error: {}", e),
        }
    }
}

/// Everything gathered for one subject
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub records: Vec<EditRecord>,
    /// Number of pages successfully fetched
    pub pages: usize,
    pub stop: StopReason,
}

/// Fetch pages for `subject` until the server runs out, the cap is reached,
/// or a request fails.
///
/// Errors never escape: they end the stream and whatever was accumulated is
/// returned. The result never holds more than `options.cap` records.
pub fn fetch_all<S: EditSource + ?Sized>(
    source: &S,
    subject: &Subject,
    options: &FetchOptions,
) -> FetchOutcome {
    let mut records: Vec<EditRecord> = Vec::new();
    let mut token: Option<ContinuationToken> = None;
    let mut pages = 0usize;
    // Size after the oldest revision of the previous batch
    let mut carried_size: Option<u64> = None;

    tracing::info!(%subject, kind = %subject.kind(), "Fetching edit history");

    let stop = loop {
        if options.cap.is_some_and(|cap| records.len() >= cap) {
            break StopReason::CapReached;
        }
        if pages > 0 {
            thread::sleep(options.page_delay);
        }

        let limit = options
            .cap
            .map_or(MAX_PAGE_SIZE, |cap| (cap - records.len()).min(MAX_PAGE_SIZE));

        match source.fetch_page(subject, token.as_ref(), limit) {
            Ok(page) => {
                pages += 1;
                if page.records.is_empty() {
                    break if page.next.is_some() {
                        StopReason::EmptyPage
                    } else {
                        StopReason::Exhausted
                    };
                }
                // The previous batch's oldest revision follows this batch's newest
                if let (Some(last), Some(_)) = (records.last_mut(), carried_size) {
                    last.size_delta = size_delta(carried_size, page.newest_size);
                }
                carried_size = page.oldest_size;
                records.extend(page.records);
                tracing::info!(%subject, page = pages, total = records.len(), "Fetched page");
                match page.next {
                    Some(next) => token = Some(next),
                    None => break StopReason::Exhausted,
                }
            }
            Err(e) => {
                tracing::warn!(%subject, page = pages + 1, error = %e, "Fetch failed, keeping partial results");
                break StopReason::Failed(e.to_string());
            }
        }
    };

    if let Some(cap) = options.cap {
        records.truncate(cap);
    }

    tracing::info!(%subject, total = records.len(), reason = %stop, "Finished fetching");

    FetchOutcome {
        records,
        pages,
        stop,
    }
}
