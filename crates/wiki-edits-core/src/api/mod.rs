//! MediaWiki API access
//!
//! The [`EditSource`] trait is the seam between the pagination loop and the
//! network: [`WikiClient`] implements it over any [`HttpClient`], tests
//! implement it with scripted pages.

mod client;
mod http;
mod paginate;
mod response;

pub use client::{ActiveUser, EditSource, Page, WikiClient, MAX_PAGE_SIZE};
pub use http::{HttpClient, ReqwestClient};
pub use paginate::{fetch_all, FetchOptions, FetchOutcome, StopReason};
