//! Mock fetcher and page builders for exercising the pipeline without a
//! network.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{FetchError, FetchResult};
use crate::fetch::Fetch;

#[derive(Clone)]
enum MockReply {
    Page(String),
    Error(FetchError),
}

/// Canned replies per URL, each with an optional artificial delay so
/// tests can force arbitrary completion orders and timeouts.
///
/// # Example
///
/// ```rust,ignore
/// use tracker::testing::{amazon_page, MockFetcher};
///
/// let fetcher = MockFetcher::new()
///     .with_page("https://a.example", amazon_page("Galaxy S23", "482,00 €"))
///     .with_error("https://b.example", FetchError::Timeout);
/// ```
#[derive(Default)]
pub struct MockFetcher {
    replies: RwLock<HashMap<String, (MockReply, Duration)>>,
    calls: RwLock<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `url` with a page body.
    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.add(url.into(), MockReply::Page(html.into()), Duration::ZERO);
        self
    }

    /// Reply to `url` with a page body after `delay`.
    pub fn with_delayed_page(
        self,
        url: impl Into<String>,
        html: impl Into<String>,
        delay: Duration,
    ) -> Self {
        self.add(url.into(), MockReply::Page(html.into()), delay);
        self
    }

    /// Reply to `url` with a fetch error.
    pub fn with_error(self, url: impl Into<String>, error: FetchError) -> Self {
        self.add(url.into(), MockReply::Error(error), Duration::ZERO);
        self
    }

    /// Reply to `url` with a fetch error after `delay`, e.g. a
    /// [`FetchError::Timeout`] surfacing at the end of its window.
    pub fn with_delayed_error(
        self,
        url: impl Into<String>,
        error: FetchError,
        delay: Duration,
    ) -> Self {
        self.add(url.into(), MockReply::Error(error), delay);
        self
    }

    /// URLs fetched so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    fn add(&self, url: String, reply: MockReply, delay: Duration) {
        self.replies.write().unwrap().insert(url, (reply, delay));
    }
}

#[async_trait]
impl Fetch for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        self.calls.write().unwrap().push(url.to_string());

        let reply = self.replies.read().unwrap().get(url).cloned();
        let Some((reply, delay)) = reply else {
            return Err(FetchError::Connection(format!("no mock reply for {url}")));
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match reply {
            MockReply::Page(html) => Ok(html),
            MockReply::Error(error) => Err(error),
        }
    }
}

/// Minimal Amazon product page accepted by the Amazon extractor.
pub fn amazon_page(title: &str, display_price: &str) -> String {
    format!(
        r#"<html><body>
            <span id="productTitle"> {title} </span>
            <span class="a-price"><span class="a-offscreen">{display_price}</span></span>
        </body></html>"#
    )
}

/// Minimal Phoneclick product page accepted by the Phoneclick extractor.
pub fn phoneclick_page(title: &str, display_price: &str) -> String {
    format!(
        r#"<html><body>
            <h1 class="caratteretitolo">{title}</h1>
            <ins>Prezzo: {display_price}</ins>
        </body></html>"#
    )
}

/// Minimal Teknozone product page accepted by the Teknozone extractor.
pub fn teknozone_page(title: &str, display_price: &str) -> String {
    format!(
        r#"<html><body>
            <h1 class="product-title">{title}</h1>
            <p class="product-cost"><strong>{display_price}</strong></p>
        </body></html>"#
    )
}
