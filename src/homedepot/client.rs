//! HTTP client for Home Depot requests using wreq for TLS fingerprint emulation.

use crate::config::Config;
use crate::homedepot::models::RawPage;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;
use wreq_util::Emulation;

/// Production Home Depot origin.
const ORIGIN: &str = "https://www.homedepot.com";

/// Errors from the fetch layer.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Server answered with a non-200 status
    #[error("request failed with status {status}")]
    Status { status: u16 },

    /// Server answered 200 but sent no content
    #[error("response body was empty")]
    EmptyBody,

    /// Connection, TLS, or timeout failure
    #[error("transport error: {0}")]
    Transport(#[from] wreq::Error),
}

/// Trait for Home Depot page fetching - enables mocking for tests.
#[async_trait]
pub trait PageFetch: Send + Sync {
    /// Fetches the search results page for a product term.
    async fn search(&self, term: &str) -> Result<RawPage, FetchError>;

    /// Fetches an arbitrary page, typically a product detail page.
    async fn page(&self, url: &str) -> Result<RawPage, FetchError>;

    /// Returns the site origin used to resolve relative product links.
    fn origin(&self) -> String;
}

/// Home Depot HTTP client with browser impersonation.
pub struct HomeDepotClient {
    client: Client,
    zip: String,
    base_url: Option<String>,
}

impl HomeDepotClient {
    /// Creates a new Home Depot client with the given configuration.
    pub async fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, None).await
    }

    /// Creates a new Home Depot client with an optional custom base URL (for testing).
    pub async fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        // Configure proxy if specified
        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self { client, zip: config.zip.clone(), base_url })
    }

    /// Returns the base URL (custom for testing, or the production origin).
    fn base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| ORIGIN.to_string())
    }

    /// Builds the search URL for a product term, pinned to the configured store ZIP.
    fn search_url(&self, term: &str) -> String {
        format!(
            "{}/s/{}?NCNI-5&storeSearchZip={}",
            self.base_url(),
            urlencoding::encode(term),
            self.zip
        )
    }

    /// Performs a GET request with browser emulation.
    async fn get(&self, url: &str) -> Result<RawPage, FetchError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache")
            .header("Sec-Ch-Ua", "\"Chromium\";v=\"131\", \"Not_A Brand\";v=\"24\"")
            .header("Sec-Ch-Ua-Mobile", "?0")
            .header("Sec-Ch-Ua-Platform", "\"macOS\"")
            .header("Sec-Fetch-Dest", "document")
            .header("Sec-Fetch-Mode", "navigate")
            .header("Sec-Fetch-Site", "none")
            .header("Sec-Fetch-User", "?1")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status != 200 {
            return Err(FetchError::Status { status: status.as_u16() });
        }

        let body = response.text().await?;
        if body.is_empty() {
            return Err(FetchError::EmptyBody);
        }

        Ok(RawPage::new(status.as_u16(), body))
    }
}

#[async_trait]
impl PageFetch for HomeDepotClient {
    async fn search(&self, term: &str) -> Result<RawPage, FetchError> {
        info!("Searching: {}", term);
        self.get(&self.search_url(term)).await
    }

    async fn page(&self, url: &str) -> Result<RawPage, FetchError> {
        self.get(url).await
    }

    fn origin(&self) -> String {
        self.base_url()
    }
}
