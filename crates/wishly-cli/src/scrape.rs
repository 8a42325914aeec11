//! Handlers for the extraction commands.

use wishly_scraper::ProductPageClient;

/// Fetches `url` once and prints the extracted product as pretty JSON.
///
/// `timeout_secs` overrides `WISHLY_SCRAPER_TIMEOUT_SECS` for this run.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the URL is invalid, or
/// the page cannot be fetched.
pub(crate) async fn run_scrape(
    config: &wishly_core::AppConfig,
    url: &str,
    timeout_secs: Option<u64>,
) -> anyhow::Result<()> {
    let timeout_secs = timeout_secs.unwrap_or(config.scraper_timeout_secs);
    if timeout_secs == 0 {
        anyhow::bail!("--timeout-secs must be at least 1");
    }

    let client = ProductPageClient::new(timeout_secs, &config.scraper_user_agent)
        .map_err(|e| anyhow::anyhow!("failed to build product page client: {e}"))?;
    let product = client.extract(url).await?;

    if product.is_empty() {
        tracing::warn!(url = %product.url, "no product metadata found on page");
    }

    println!("{}", serde_json::to_string_pretty(&product)?);
    Ok(())
}

/// Renders the parsed price of `text`, or `none` when nothing parses.
pub(crate) fn format_price(text: &str) -> String {
    wishly_scraper::extract_price(text).map_or_else(|| "none".to_string(), |p| p.to_string())
}
