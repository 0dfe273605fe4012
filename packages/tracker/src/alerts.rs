//! Price-drop alerts against the previous snapshot.
//!
//! Pure comparison: the caller supplies the previous prices (see
//! [`crate::storage::Storage::previous_prices`]) and decides how to
//! surface the alerts. First runs, unparseable prices and sites without
//! prior data never alert.

use std::collections::HashMap;

use tracing::debug;

use crate::types::config::AlertConfig;
use crate::types::quote::Quote;

/// A noteworthy price movement on one site.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceAlert {
    pub site: String,
    pub title: String,

    /// Numeric price observed this run
    pub current_price: f64,

    /// Numeric price from the previous snapshot
    pub previous_price: f64,

    /// Display string of the current price
    pub display_price: String,

    pub url: String,

    /// Human-readable reasons; at least one per alert
    pub reasons: Vec<String>,
}

/// Compare this run's quotes against the previous snapshot prices and
/// the configured thresholds.
pub fn check_alerts(
    config: &AlertConfig,
    previous: &HashMap<String, f64>,
    quotes: &[Quote],
) -> Vec<PriceAlert> {
    let mut alerts = Vec::new();

    for quote in quotes {
        let Some(current) = quote.price_value() else {
            continue;
        };
        let Some(&last) = previous.get(&quote.site) else {
            continue;
        };
        if last <= 0.0 || current <= 0.0 {
            continue;
        }

        let mut reasons = Vec::new();

        if last > current {
            let drop = last - current;
            let percentage = drop / last * 100.0;
            if percentage >= config.percentage_drop {
                reasons.push(format!("price dropped {percentage:.1}%"));
            }
            if drop >= config.absolute_drop {
                reasons.push(format!("price dropped €{drop:.2}"));
            }
        }

        if let Some(&target) = config.target_prices.get(&quote.site) {
            if target > 0.0 && current <= target {
                reasons.push(format!("target price €{target:.2} reached"));
            }
        }

        if reasons.is_empty() {
            debug!(site = %quote.site, price = current, "no alert");
            continue;
        }

        alerts.push(PriceAlert {
            site: quote.site.clone(),
            title: quote.title.clone(),
            current_price: current,
            previous_price: last,
            display_price: quote.price.clone(),
            url: quote.url.clone(),
            reasons,
        });
    }

    alerts
}
