//! Bounded-time page retrieval.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, UPGRADE_INSECURE_REQUESTS};
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};
use crate::types::config::Settings;

/// One bounded-time retrieval per call. No retries; retry policy, if
/// any, belongs to the caller.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch the page at `url` and return its body as text.
    async fn fetch(&self, url: &str) -> FetchResult<String>;
}

/// Production fetcher over a shared `reqwest::Client`.
///
/// The client carries a browser-like identity; sale sites routinely
/// block the default library User-Agent.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(settings: &Settings) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .parse()
                .unwrap(),
        );
        headers.insert(ACCEPT_LANGUAGE, "it-IT,it;q=0.9,en;q=0.8".parse().unwrap());
        headers.insert(CONNECTION, "keep-alive".parse().unwrap());
        headers.insert(UPGRADE_INSECURE_REQUESTS, "1".parse().unwrap());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.as_str())
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        debug!(url = %url, "fetching page");

        let response = self.client.get(url).send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "non-success response");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(classify)?;
        debug!(url = %url, bytes = body.len(), "page fetched");
        Ok(body)
    }
}

/// Map a transport error onto the fetch taxonomy. Anything that is not
/// a timeout counts as a connection failure; status codes are checked
/// separately on the response.
fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Connection(err.to_string())
    }
}
