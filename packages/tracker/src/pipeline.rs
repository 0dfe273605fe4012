//! Concurrent fetch/extract orchestration.
//!
//! One task per configured site, all fully independent: a slow or broken
//! site never blocks or corrupts the others, and every task runs to a
//! terminal state before the aggregate result exists. Outcomes are
//! joined in configuration order, so the persisted output is stable
//! across runs regardless of network timing.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::{FetchError, SiteError};
use crate::fetch::Fetch;
use crate::types::config::{SiteConfig, TrackerConfig};
use crate::types::outcome::{AggregateResult, SiteOutcome};
use crate::types::quote::Quote;

/// Run one tracking cycle over every configured site.
///
/// Always returns exactly one outcome per site; fetch and extract
/// failures are recorded, never propagated.
pub async fn run(fetcher: Arc<dyn Fetch>, config: &TrackerConfig) -> AggregateResult {
    let started_at = Utc::now();
    info!(
        product = %config.product.name,
        sites = config.sites.len(),
        "starting tracking run"
    );

    let mut handles = Vec::with_capacity(config.sites.len());
    for site in &config.sites {
        let fetcher = Arc::clone(&fetcher);
        let site = site.clone();
        handles.push((site.name.clone(), tokio::spawn(track_site(fetcher, site))));
    }

    // Await in spawn order: output order follows the configuration,
    // whatever order the tasks actually finished in.
    let mut result = AggregateResult::new(config.product.name.clone(), started_at);
    for (site, handle) in handles {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(site = %site, error = %err, "site task aborted");
                SiteOutcome::Failure {
                    site,
                    error: SiteError::Fetch(FetchError::Connection(format!(
                        "task aborted: {err}"
                    ))),
                }
            }
        };

        if let SiteOutcome::Success(quote) = &outcome {
            if let (Some(range), Some(value)) =
                (&config.settings.price_range, quote.price_value())
            {
                if !range.contains(value) {
                    warn!(
                        site = %quote.site,
                        price = value,
                        min = range.min,
                        max = range.max,
                        "price outside plausibility range"
                    );
                }
            }
        }

        result.record(outcome);
    }

    info!(
        successes = result.successes(),
        sites = result.sites_tracked(),
        status = ?result.status(),
        "tracking run finished"
    );
    result
}

/// Fetch and extract one site. Every failure is converted into a
/// [`SiteOutcome::Failure`] here, at the task boundary.
async fn track_site(fetcher: Arc<dyn Fetch>, site: SiteConfig) -> SiteOutcome {
    debug!(site = %site.name, url = %site.url, "tracking site");

    let html = match fetcher.fetch(&site.url).await {
        Ok(html) => html,
        Err(err) => {
            warn!(site = %site.name, error = %err, "fetch failed");
            return SiteOutcome::Failure {
                site: site.name,
                error: err.into(),
            };
        }
    };

    match site.extractor.extractor().extract(&html) {
        Ok(data) => {
            info!(site = %site.name, price = %data.price, "price extracted");
            SiteOutcome::Success(Quote::new(site.name, data.title, data.price, site.url))
        }
        Err(err) => {
            warn!(site = %site.name, error = %err, "extraction failed");
            SiteOutcome::Failure {
                site: site.name,
                error: err.into(),
            }
        }
    }
}
