//! Durable outputs: the latest-run snapshot and the append-only history.
//!
//! The snapshot is replaced wholesale on every run through a
//! write-then-rename, so readers never observe a truncated file. The
//! history log only ever grows; its header is written once, when the
//! file is created. Both paths come from the output configuration, not
//! process-wide state.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::PersistResult;
use crate::types::config::OutputConfig;
use crate::types::outcome::AggregateResult;
use crate::types::quote::{parse_price, Quote};

/// Latest-run snapshot document. Prices keep the locale display string.
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Run start time, RFC 3339
    pub timestamp: DateTime<Utc>,

    /// Product under tracking
    pub product: String,

    /// One entry per successful quote, configuration order
    pub prices: Vec<SnapshotPrice>,
}

/// One quoted price inside the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotPrice {
    pub site: String,
    pub title: String,
    pub price: String,
    pub url: String,
}

impl SnapshotPrice {
    fn from_quote(quote: &Quote) -> Self {
        Self {
            site: quote.site.clone(),
            title: quote.title.clone(),
            price: quote.price.clone(),
            url: quote.url.clone(),
        }
    }
}

/// One appended history row per quote. Unlike the snapshot, `price` is
/// the normalized plain-decimal form (`482.00`), and the timestamp is
/// kept at second precision.
#[derive(Debug, Serialize)]
struct HistoryRecord {
    timestamp: String,
    site: String,
    title: String,
    price: String,
    url: String,
}

impl HistoryRecord {
    fn from_quote(quote: &Quote) -> Self {
        Self {
            timestamp: quote.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            site: quote.site.clone(),
            title: quote.title.clone(),
            price: quote.normalized_price(),
            url: quote.url.clone(),
        }
    }
}

/// What a persist call wrote, for the run summary.
#[derive(Debug)]
pub struct PersistReport {
    pub snapshot_path: PathBuf,
    pub history_path: PathBuf,

    /// History rows appended by this run
    pub history_rows: usize,
}

/// Writer for both durable outputs.
pub struct Storage {
    snapshot_path: PathBuf,
    history_path: PathBuf,
}

impl Storage {
    pub fn new(output: &OutputConfig) -> Self {
        Self {
            snapshot_path: output.snapshot_path(),
            history_path: output.history_path(),
        }
    }

    /// Persist one run: replace the snapshot, append to the history.
    ///
    /// Errors here are fatal to the run: they are returned, not
    /// swallowed, and nothing is retried.
    pub fn persist(&self, result: &AggregateResult) -> PersistResult<PersistReport> {
        self.write_snapshot(result)?;
        let history_rows = self.append_history(&result.quotes)?;

        info!(
            snapshot = %self.snapshot_path.display(),
            history = %self.history_path.display(),
            rows = history_rows,
            "run persisted"
        );
        Ok(PersistReport {
            snapshot_path: self.snapshot_path.clone(),
            history_path: self.history_path.clone(),
            history_rows,
        })
    }

    /// Prices from the previous snapshot, for alert comparison. A
    /// missing or unreadable snapshot is simply a first run.
    pub fn previous_prices(&self) -> HashMap<String, f64> {
        let Ok(raw) = fs::read_to_string(&self.snapshot_path) else {
            return HashMap::new();
        };
        let Ok(snapshot) = serde_json::from_str::<Snapshot>(&raw) else {
            return HashMap::new();
        };

        snapshot
            .prices
            .iter()
            .filter_map(|price| parse_price(&price.price).map(|value| (price.site.clone(), value)))
            .collect()
    }

    fn write_snapshot(&self, result: &AggregateResult) -> PersistResult<()> {
        let snapshot = Snapshot {
            timestamp: result.started_at,
            product: result.product.clone(),
            prices: result.quotes.iter().map(SnapshotPrice::from_quote).collect(),
        };

        if let Some(dir) = self.snapshot_path.parent() {
            fs::create_dir_all(dir)?;
        }

        // Write a sibling and rename over the old snapshot, so a crash
        // mid-write never leaves a torn file at the published path.
        let tmp = self.snapshot_path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&snapshot)?)?;
        fs::rename(&tmp, &self.snapshot_path)?;

        debug!(
            path = %self.snapshot_path.display(),
            prices = snapshot.prices.len(),
            "snapshot replaced"
        );
        Ok(())
    }

    fn append_history(&self, quotes: &[Quote]) -> PersistResult<usize> {
        if let Some(dir) = self.history_path.parent() {
            fs::create_dir_all(dir)?;
        }

        // Header goes in only when the file is created
        let is_new = !self.history_path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.history_path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        for quote in quotes {
            writer.serialize(HistoryRecord::from_quote(quote))?;
        }
        writer.flush()?;

        Ok(quotes.len())
    }
}
