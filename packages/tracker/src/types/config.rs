//! Run configuration: the monitored product, the sites to poll and the
//! general settings, loaded from a JSON file.
//!
//! Sites are kept as an ordered array; the order of the configuration
//! is the order of quotes and errors in the run result and in the
//! persisted outputs.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::{ConfigError, ConfigResult};

/// Browser identity sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Per-request timeout applied to every site.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration document.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    /// Product under tracking
    pub product: ProductConfig,

    /// Monitored sites, in output order
    pub sites: Vec<SiteConfig>,

    /// General settings
    #[serde(default)]
    pub settings: Settings,
}

impl TrackerConfig {
    /// Load and validate a configuration file.
    ///
    /// Disabled sites are dropped here; downstream code only ever sees
    /// enabled sites. Fails when the file is missing or malformed, when
    /// a site URL does not parse, or when no site remains enabled.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        let mut config: TrackerConfig = serde_json::from_str(&raw)?;

        config.sites.retain(|site| site.enabled);
        if config.sites.is_empty() {
            return Err(ConfigError::NoSitesEnabled);
        }

        for site in &config.sites {
            Url::parse(&site.url).map_err(|source| ConfigError::InvalidUrl {
                site: site.name.clone(),
                source,
            })?;
        }

        debug!(
            path = %path.as_ref().display(),
            sites = config.sites.len(),
            "configuration loaded"
        );
        Ok(config)
    }
}

/// The product being monitored.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductConfig {
    /// Display name used in the snapshot and the console summary
    pub name: String,

    #[serde(default)]
    pub description: String,
}

/// One monitored site.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Site identifier, unique within the configuration
    pub name: String,

    /// Product page URL
    pub url: String,

    /// Extraction rule applied to the fetched page
    pub extractor: ExtractorKind,

    /// Disabled sites are skipped without being counted in the run
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Names the site-specific extraction rule. Deserialized from the
/// configuration; the mapping to a concrete extractor lives in
/// [`crate::extract`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    Amazon,
    Phoneclick,
    Teknozone,
}

/// General settings with sensible defaults for every field.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// User-Agent header value
    pub user_agent: String,

    /// Plausibility range; out-of-range prices are logged, not dropped
    pub price_range: Option<PriceRange>,

    /// Where the snapshot and history files live
    pub output: OutputConfig,

    /// Price-drop alerting; absent means no alert checks
    pub alerts: Option<AlertConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            price_range: None,
            output: OutputConfig::default(),
            alerts: None,
        }
    }
}

/// Accepted price interval for plausibility warnings.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

/// Durable output locations, passed explicitly into the storage layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory holding both output files; created on first persist
    pub data_dir: PathBuf,

    /// Latest-run snapshot, replaced wholesale each run
    pub snapshot_filename: String,

    /// Append-only history log
    pub history_filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            snapshot_filename: "latest_prices.json".to_string(),
            history_filename: "price_history.csv".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.snapshot_filename)
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(&self.history_filename)
    }
}

/// Thresholds for price-drop alerts.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertConfig {
    /// Alert when the price drops by at least this percentage
    #[serde(default = "default_percentage_drop")]
    pub percentage_drop: f64,

    /// Alert when the price drops by at least this absolute amount
    #[serde(default = "default_absolute_drop")]
    pub absolute_drop: f64,

    /// Per-site target prices; reaching one always alerts
    #[serde(default)]
    pub target_prices: HashMap<String, f64>,
}

fn default_percentage_drop() -> f64 {
    5.0
}

fn default_absolute_drop() -> f64 {
    20.0
}
