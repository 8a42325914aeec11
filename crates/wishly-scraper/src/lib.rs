pub mod client;
pub mod currency;
pub mod error;
pub mod extract;
pub mod parse;
pub mod types;

pub use client::{resolve_target_url, ProductPageClient, TargetUrl, DEFAULT_TIMEOUT_SECS};
pub use currency::{detect_currency, resolve_currency};
pub use error::ScraperError;
pub use extract::extract_product;
pub use parse::{extract_price, normalize_name};
pub use types::ExtractionDraft;
