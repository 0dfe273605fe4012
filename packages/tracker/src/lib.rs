//! Concurrent product price tracking.
//!
//! Fetches one product's page on several independent sale sites in
//! parallel, extracts a normalized price record per site, and persists
//! both the latest snapshot and an append-only history log. One broken
//! or slow site never blocks or corrupts the results of the others, and
//! the output order always follows the configuration, not network
//! timing.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tracker::{pipeline, HttpFetcher, Storage, TrackerConfig};
//!
//! let config = TrackerConfig::from_file("config.json")?;
//! let fetcher = Arc::new(HttpFetcher::new(&config.settings));
//!
//! let result = pipeline::run(fetcher, &config).await;
//!
//! let storage = Storage::new(&config.settings.output);
//! let report = storage.persist(&result)?;
//! ```
//!
//! # Modules
//!
//! - [`fetch`] - Bounded-time HTTP retrieval
//! - [`extract`] - Per-site price extraction
//! - [`pipeline`] - Concurrent orchestration and the join
//! - [`storage`] - Snapshot and history persistence
//! - [`alerts`] - Price-drop alert checks
//! - [`types`] - Configuration and run data types
//! - [`testing`] - Mock fetcher and page builders for tests

pub mod alerts;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod storage;
pub mod testing;
pub mod types;

// Re-export core types at crate root
pub use error::{ConfigError, ExtractError, FetchError, PersistError, SiteError};
pub use extract::{
    AmazonExtractor, Extractor, PhoneclickExtractor, PriceData, TeknozoneExtractor,
};
pub use fetch::{Fetch, HttpFetcher};
pub use storage::{PersistReport, Snapshot, SnapshotPrice, Storage};

pub use alerts::{check_alerts, PriceAlert};
pub use types::{
    config::{
        AlertConfig, ExtractorKind, OutputConfig, PriceRange, ProductConfig, Settings,
        SiteConfig, TrackerConfig,
    },
    outcome::{AggregateResult, RunStatus, SiteOutcome},
    quote::{parse_price, Quote},
};
