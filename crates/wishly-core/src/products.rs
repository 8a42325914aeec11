use rust_decimal::Decimal;
use serde::Serialize;

/// Best-effort product details recovered from a product page, used to
/// pre-fill a wishlist item.
///
/// Every field is always present: values that could not be found are an
/// empty string (`name`, `image_url`) or `None` (`price`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapedProduct {
    /// Whitespace-collapsed title, at most 200 characters.
    pub name: String,
    /// Serialized as a JSON number so clients can use it directly.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    /// ISO 4217 code, e.g. `"NGN"`.
    pub currency: String,
    /// Image URL exactly as found on the page; may be relative.
    pub image_url: String,
    /// The scheme-prefixed URL that was fetched.
    pub url: String,
    /// Lowercased host (and explicit port) of `url`.
    pub source_domain: String,
}

impl ScrapedProduct {
    /// Returns `true` if no name, price or image was recovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.price.is_none() && self.image_url.is_empty()
    }
}
