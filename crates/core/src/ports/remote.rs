use async_trait::async_trait;
use reqwest::Client;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;

use super::traits::{RemoteFeed, RemoteRecord};

/// Remote-refresh timeout. Keeps a dead endpoint from leaving an
/// unbounded request outstanding at startup.
#[cfg(not(target_arch = "wasm32"))]
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// HTTP implementation of the remote feed.
///
/// Queries a single fixed JSON endpoint whose body is an array of
/// `{"amount": number, "category": string}` records. The payload is only
/// ever logged, so a slow or broken endpoint costs one timed-out request
/// and a warning.
pub struct HttpRemoteFeed {
    client: Client,
    url: String,
}

impl HttpRemoteFeed {
    /// Build a feed for `url`. Fails with `InvalidUrl` if the URL does not
    /// look like an absolute http(s) URL.
    pub fn new(url: impl Into<String>) -> Result<Self, CoreError> {
        let url = url.into();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CoreError::InvalidUrl(url));
        }

        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS));

        Ok(Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            url,
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RemoteFeed for HttpRemoteFeed {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn fetch_records(&self) -> Result<Vec<RemoteRecord>, CoreError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::Network(format!(
                "Remote feed returned HTTP {status}"
            )));
        }

        let body = response.text().await?;
        let records: Vec<RemoteRecord> = serde_json::from_str(&body)?;
        Ok(records)
    }
}
