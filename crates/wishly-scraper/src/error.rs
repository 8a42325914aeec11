use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("the product page took too long to respond: {url}")]
    FetchTimeout { url: String },

    #[error("could not reach the product page {url}: {reason}")]
    Fetch { url: String, reason: String },
}
