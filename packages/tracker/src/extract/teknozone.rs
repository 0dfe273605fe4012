//! Extraction rules for Teknozone.it product pages.

use regex::Regex;
use scraper::{Html, Selector};

use super::{select_text, Extractor, PriceData};
use crate::error::{ExtractError, ExtractResult};

/// Teknozone product page: title in `h1.product-title`; price in
/// `p.product-cost strong`, falling back to the paragraph text and then
/// to any `<strong>` carrying a `€` amount anywhere on the page.
pub struct TeknozoneExtractor;

impl Extractor for TeknozoneExtractor {
    fn extract(&self, html: &str) -> ExtractResult<PriceData> {
        let document = Html::parse_document(html);

        let title =
            select_text(&document, "h1.product-title").ok_or(ExtractError::TitleNotFound)?;

        let raw = select_text(&document, "p.product-cost strong")
            .or_else(|| select_text(&document, "p.product-cost"))
            .or_else(|| strong_with_amount(&document))
            .ok_or(ExtractError::PriceNotFound)?;

        // A cost element without a currency sign is a layout change
        if !raw.contains('€') {
            return Err(ExtractError::PriceNotFound);
        }

        Ok(PriceData {
            title,
            price: normalize_price(&raw),
        })
    }
}

/// First `<strong>` whose text holds a `€` sign and a decimal amount.
fn strong_with_amount(document: &Html) -> Option<String> {
    let selector = Selector::parse("strong").ok()?;
    let re = Regex::new(r"\d+[.,]\d+").unwrap();

    document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .find(|text| text.contains('€') && re.is_match(text))
}

/// Reduce the element text to `€<amount>`; text that matches no known
/// pattern is kept as found.
fn normalize_price(text: &str) -> String {
    let re = Regex::new(r"€\s*(\d+[.,]\d+)").unwrap();
    match re.captures(text.trim()) {
        Some(caps) => format!("€{}", &caps[1]),
        None => text.trim().to_string(),
    }
}
