//! Per-site price extraction.
//!
//! Each monitored site gets one [`Extractor`] implementation holding the
//! structural knowledge of where that site keeps the product title and
//! price. Extractors are pure transformations over fetched page content;
//! they touch neither network nor disk. The configuration's extraction
//! rule name maps to a concrete implementation through
//! [`ExtractorKind::extractor`].

mod amazon;
mod phoneclick;
mod teknozone;

pub use amazon::AmazonExtractor;
pub use phoneclick::PhoneclickExtractor;
pub use teknozone::TeknozoneExtractor;

use scraper::{Html, Selector};

use crate::error::ExtractResult;
use crate::types::config::ExtractorKind;

/// Title and price located on a page, before promotion to a quote.
/// Both fields are always populated; partial extraction is an error.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceData {
    /// Product title as found on the page
    pub title: String,

    /// Display price, normalized to `€<amount>` with the site's own
    /// decimal notation preserved
    pub price: String,
}

/// Site-specific extraction over fetched page content.
pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str) -> ExtractResult<PriceData>;
}

impl ExtractorKind {
    /// The configuration table: extraction rule name → concrete
    /// extractor.
    pub fn extractor(&self) -> Box<dyn Extractor> {
        match self {
            ExtractorKind::Amazon => Box::new(AmazonExtractor),
            ExtractorKind::Phoneclick => Box::new(PhoneclickExtractor),
            ExtractorKind::Teknozone => Box::new(TeknozoneExtractor),
        }
    }
}

/// Text of the first element matching `css`, trimmed. `None` when the
/// selector matches nothing or only whitespace.
fn select_text(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}
