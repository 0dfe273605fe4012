//! Typed errors for the tracking pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Fetch and extract
//! failures are site-local data threaded through the run result;
//! persistence and configuration failures abort the run.

use thiserror::Error;

/// Errors raised while retrieving a site's page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No response within the configured bound
    #[error("request timed out")]
    Timeout,

    /// DNS, TCP or TLS level failure
    #[error("connection failed: {0}")]
    Connection(String),

    /// Non-success status code (bot walls, captcha redirects, ...)
    #[error("HTTP status {0}")]
    Status(u16),
}

/// Errors raised while locating data in a fetched page.
///
/// Both variants mean the site's markup no longer matches expectations;
/// they differ only in diagnostics and are handled identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// Product title element not found
    #[error("product title not found")]
    TitleNotFound,

    /// Price element not found or unrecognizable
    #[error("price not found")]
    PriceNotFound,
}

/// A failure that aborts one site's contribution without touching the
/// rest of the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiteError {
    /// Page retrieval failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Page retrieved but data could not be located
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),
}

/// Durable-write failures. Fatal to the run, never retried.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Filesystem error while writing snapshot or history
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// History row serialization failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Configuration loading and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file missing or unreadable
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid JSON for the expected schema
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A configured site URL does not parse
    #[error("invalid URL for site {site}: {source}")]
    InvalidUrl {
        site: String,
        #[source]
        source: url::ParseError,
    },

    /// Every configured site is disabled
    #[error("no sites enabled in configuration")]
    NoSitesEnabled,
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for extract operations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Result type alias for persistence operations.
pub type PersistResult<T> = std::result::Result<T, PersistError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
