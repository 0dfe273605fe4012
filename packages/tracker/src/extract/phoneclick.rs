//! Extraction rules for Phoneclick.it product pages.

use regex::Regex;
use scraper::Html;

use super::{select_text, Extractor, PriceData};
use crate::error::{ExtractError, ExtractResult};

/// Phoneclick product page: title in `h1.caratteretitolo`; the `<ins>`
/// element lists the recommended price followed by the discounted one,
/// so the last `€`-amount in its text is the price actually charged.
pub struct PhoneclickExtractor;

impl Extractor for PhoneclickExtractor {
    fn extract(&self, html: &str) -> ExtractResult<PriceData> {
        let document = Html::parse_document(html);

        let title =
            select_text(&document, "h1.caratteretitolo").ok_or(ExtractError::TitleNotFound)?;

        let ins_text = select_text(&document, "ins").ok_or(ExtractError::PriceNotFound)?;

        let re = Regex::new(r"€\s*(\d+[.,]\d+)").unwrap();
        let amount = re
            .captures_iter(&ins_text)
            .last()
            .map(|caps| caps[1].to_string())
            .ok_or(ExtractError::PriceNotFound)?;

        Ok(PriceData {
            title,
            price: format!("€{amount}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_takes_last_price_in_ins() {
        let page = r#"
            <h1 class="caratteretitolo">Samsung Galaxy S23 5G 256GB</h1>
            <ins>Prezzo consigliato: € 599,00 - Prezzo: €485,00</ins>"#;

        let data = PhoneclickExtractor.extract(page).unwrap();
        assert_eq!(data.title, "Samsung Galaxy S23 5G 256GB");
        assert_eq!(data.price, "€485,00");
    }

    #[test]
    fn test_single_price() {
        let page = r#"
            <h1 class="caratteretitolo">Galaxy S23</h1>
            <ins>€485,00</ins>"#;

        let data = PhoneclickExtractor.extract(page).unwrap();
        assert_eq!(data.price, "€485,00");
    }

    #[test]
    fn test_missing_title() {
        let page = "<ins>€485,00</ins>";
        assert_eq!(
            PhoneclickExtractor.extract(page),
            Err(ExtractError::TitleNotFound)
        );
    }

    #[test]
    fn test_missing_ins_element() {
        let page = r#"<h1 class="caratteretitolo">Galaxy S23</h1>"#;
        assert_eq!(
            PhoneclickExtractor.extract(page),
            Err(ExtractError::PriceNotFound)
        );
    }

    #[test]
    fn test_ins_without_recognizable_amount() {
        let page = r#"
            <h1 class="caratteretitolo">Galaxy S23</h1>
            <ins>prezzo in aggiornamento</ins>"#;

        assert_eq!(
            PhoneclickExtractor.extract(page),
            Err(ExtractError::PriceNotFound)
        );
    }
}
