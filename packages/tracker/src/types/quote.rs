//! A single observed price.

use chrono::{DateTime, Utc};
use regex::Regex;

/// One successfully extracted observation for a site at a point in time.
///
/// A quote only exists when both title and price were located; partial
/// extraction surfaces as an error, never as a quote with empty fields.
/// `price` is the currency-formatted display string as shown on the site
/// (e.g. `€482,00`); the plain-decimal form used by the history log is
/// derived from it via [`Quote::normalized_price`].
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Site identifier, unique within a run
    pub site: String,

    /// Product title as found on the page
    pub title: String,

    /// Currency-formatted display price, original notation preserved
    pub price: String,

    /// Source link
    pub url: String,

    /// Moment of observation
    pub timestamp: DateTime<Utc>,
}

impl Quote {
    /// Create a quote observed now.
    pub fn new(
        site: impl Into<String>,
        title: impl Into<String>,
        price: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            title: title.into(),
            price: price.into(),
            url: url.into(),
            timestamp: Utc::now(),
        }
    }

    /// Numeric value of the display price, if it parses.
    pub fn price_value(&self) -> Option<f64> {
        parse_price(&self.price)
    }

    /// Plain decimal-point form for the history log: `€1.234,56` becomes
    /// `1234.56`. Falls back to the stripped display text when the price
    /// does not parse.
    pub fn normalized_price(&self) -> String {
        match self.price_value() {
            Some(value) => format!("{value:.2}"),
            None => self.price.trim_start_matches('€').trim().to_string(),
        }
    }
}

/// Parse a locale-formatted price string into a numeric value.
///
/// Accepts the notations seen on the monitored sites: `€482,00`,
/// `€1.234,56`, `482.00`, plain integers. When both separators appear,
/// dots are thousands groups and the comma is the decimal mark.
pub fn parse_price(text: &str) -> Option<f64> {
    let re = Regex::new(r"\d{1,3}(?:[.,]\d{3})*(?:[.,]\d{1,2})?|\d+").unwrap();
    let token = re.find(text)?.as_str();

    let has_comma = token.contains(',');
    let has_dot = token.contains('.');

    let cleaned = if has_comma && has_dot {
        token.replace('.', "").replace(',', ".")
    } else if has_comma {
        let parts: Vec<&str> = token.split(',').collect();
        if parts.len() == 2 && parts[1].len() == 2 {
            token.replace(',', ".")
        } else {
            token.replace(',', "")
        }
    } else if has_dot {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() == 2 && parts[1].len() == 2 {
            token.to_string()
        } else {
            token.replace('.', "")
        }
    } else {
        token.to_string()
    };

    cleaned.parse().ok()
}
