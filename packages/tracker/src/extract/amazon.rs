//! Extraction rules for Amazon.it product pages.

use regex::Regex;
use scraper::Html;

use super::{select_text, Extractor, PriceData};
use crate::error::{ExtractError, ExtractResult};

/// Amazon product page: title in `span#productTitle`; price in the
/// offscreen accessibility span, with the visible whole/fraction pair as
/// fallback when the offscreen copy is absent.
pub struct AmazonExtractor;

impl Extractor for AmazonExtractor {
    fn extract(&self, html: &str) -> ExtractResult<PriceData> {
        let document = Html::parse_document(html);

        let title =
            select_text(&document, "span#productTitle").ok_or(ExtractError::TitleNotFound)?;

        let raw = match select_text(&document, "span.a-offscreen") {
            Some(text) => text,
            None => {
                let whole = select_text(&document, "span.a-price-whole")
                    .ok_or(ExtractError::PriceNotFound)?;
                // Missing fraction means a round price
                let fraction = select_text(&document, "span.a-price-fraction")
                    .unwrap_or_else(|| "00".to_string());
                format!("{whole},{fraction}€")
            }
        };

        let price = normalize_price(&raw).ok_or(ExtractError::PriceNotFound)?;
        Ok(PriceData { title, price })
    }
}

/// Rebuild the display price as `€<euros>,<cents>` from whatever Amazon
/// renders: `482,00 €`, `€482.00`, a bare `482`.
fn normalize_price(text: &str) -> Option<String> {
    let re = Regex::new(r"(\d{1,3}(?:\.\d{3})+|\d+)(?:[.,](\d{1,2}))?").unwrap();
    let caps = re.captures(text.trim())?;
    let euros = caps.get(1)?.as_str();
    let cents = caps.get(2).map(|m| m.as_str()).unwrap_or("00");
    Some(format!("€{euros},{cents}"))
}
