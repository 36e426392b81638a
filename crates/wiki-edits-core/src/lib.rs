//! # wiki-edits-core
//!
//! Core library for fetching edit histories from a MediaWiki API, counting
//! edits per editor and exporting the results to flat files.
//!
//! ## Modules
//!
//! - [`api`] - HTTP transport, MediaWiki client and continuation-based pagination
//! - [`config`] - Configuration file handling and validation
//! - [`error`] - Error types and Result alias
//! - [`export`] - Text, CSV and JSON exporters
//! - [`record`] - Edit records and subjects
//! - [`run`] - Multi-subject run engine and presets
//! - [`stats`] - Per-editor counting and the combined summary report
//!
//! ## Example
//!
//! ```no_run
//! use wiki_edits_core::{Config, RunEngine, RunPreset, WikiClient};
//!
//! let config = Config::load();
//! let client = WikiClient::from_config(&config).expect("Failed to build client");
//!
//! let preset = RunPreset::ArticleHistory;
//! let engine = RunEngine::new(client, preset.options(&config));
//! let state = engine
//!     .run(&preset.subjects(["Barack Obama", "Joe Biden"]))
//!     .expect("Output directory is not writable");
//!
//! for entry in state.counter.top(20) {
//!     println!("{}: {}", entry.editor, entry.edits);
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod record;
pub mod run;
pub mod stats;

// Error types
pub use error::{Error, Result};

// Configuration
pub use config::Config;

// Records
pub use record::{ContinuationToken, EditRecord, Subject, SubjectKind, SubjectResult, ANONYMOUS};

// API access
pub use api::{
    fetch_all, ActiveUser, EditSource, FetchOptions, FetchOutcome, HttpClient, Page,
    ReqwestClient, StopReason, WikiClient, MAX_PAGE_SIZE,
};

// Statistics
pub use stats::{EditorCount, EditorCounter, RunSummary, SubjectTotal};

// Export
pub use export::{
    CsvExporter, ExportFormat, Exporter, FileNaming, JsonExporter, TextExporter,
};

// Runs
pub use run::{
    ProgressCallback, RunEngine, RunOptions, RunPreset, RunProgress, RunState, SubjectPhase,
    SubjectReport, SummaryOptions, POLITICAL_FIGURES,
};
