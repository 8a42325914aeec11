//! HTTP client for fetching product pages and running extraction on them.

mod target;

use std::time::Duration;

use reqwest::Client;
use wishly_core::ScrapedProduct;

use crate::error::ScraperError;
use crate::extract::extract_product;

pub use target::{resolve_target_url, TargetUrl};

/// Timeout applied to product page fetches when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Fetches a product page once and extracts best-effort metadata from it.
///
/// Holds no per-request state; clone or share it behind an `Arc` to run
/// extractions concurrently. Fetches are never retried: a timeout or
/// transport failure ends that extraction.
#[derive(Debug, Clone)]
pub struct ProductPageClient {
    client: Client,
}

impl ProductPageClient {
    /// Creates a client with the given `User-Agent`. `timeout_secs` bounds
    /// connecting and each read from the socket, including the wait for
    /// response headers; a body that keeps trickling in is not cut off.
    ///
    /// Redirects are followed (reqwest's default policy, up to 10 hops).
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let timeout = Duration::from_secs(timeout_secs);
        let client = Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches `input_url` and extracts its product metadata.
    ///
    /// Everything after a successful fetch is best-effort: missing or
    /// malformed page data yields empty fields, never an error.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`]: input has no usable host.
    /// - [`ScraperError::FetchTimeout`]: the page did not load in time.
    /// - [`ScraperError::Fetch`]: any other transport failure or non-2xx status.
    pub async fn extract(&self, input_url: &str) -> Result<ScrapedProduct, ScraperError> {
        let target = resolve_target_url(input_url)?;
        let body = self.fetch_page(&target.url).await?;
        let product = extract_product(&body, &target);

        tracing::info!(
            url = %target.url,
            domain = %target.domain,
            found_name = !product.name.is_empty(),
            found_price = product.price.is_some(),
            found_image = !product.image_url.is_empty(),
            "product page extracted"
        );

        Ok(product)
    }

    /// Fetches the body of `url` as text.
    ///
    /// # Errors
    ///
    /// See [`Self::extract`]; the same fetch errors apply.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| classify_fetch_error(url, &e))?;

        response
            .text()
            .await
            .map_err(|e| classify_fetch_error(url, &e))
    }
}

/// Splits reqwest failures into the timeout case and everything else.
fn classify_fetch_error(url: &str, error: &reqwest::Error) -> ScraperError {
    if error.is_timeout() {
        tracing::warn!(url, "product page fetch timed out");
        ScraperError::FetchTimeout {
            url: url.to_owned(),
        }
    } else {
        tracing::warn!(url, error = %error, "product page fetch failed");
        ScraperError::Fetch {
            url: url.to_owned(),
            reason: error.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
