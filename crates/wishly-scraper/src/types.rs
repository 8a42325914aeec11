//! Intermediate state threaded through the extraction strategies.

/// Raw values captured from a product page before normalization.
///
/// Each slot is first-writer-wins: once a strategy stores a non-empty value,
/// later strategies leave it alone. Blank values never occupy a slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionDraft {
    pub name: Option<String>,
    /// Price exactly as found, e.g. `"₦45,000"` or `"12.99"`.
    pub price_text: Option<String>,
    /// Structured currency code (Open Graph or JSON-LD). Only three-character
    /// values are accepted, so a malformed earlier source does not shadow a
    /// valid later one.
    pub currency: Option<String>,
    pub image_url: Option<String>,
}

impl ExtractionDraft {
    pub fn fill_name(&mut self, value: &str) {
        fill(&mut self.name, value);
    }

    pub fn fill_price_text(&mut self, value: &str) {
        fill(&mut self.price_text, value);
    }

    pub fn fill_currency(&mut self, value: &str) {
        if value.trim().chars().count() == 3 {
            fill(&mut self.currency, value);
        } else {
            tracing::debug!(value, "ignoring structured currency that is not a 3-letter code");
        }
    }

    pub fn fill_image_url(&mut self, value: &str) {
        fill(&mut self.image_url, value);
    }

    /// Returns `true` once every slot the strategies can fill is taken.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.name.is_some()
            && self.price_text.is_some()
            && self.currency.is_some()
            && self.image_url.is_some()
    }
}

/// Stores the trimmed `value` into `slot` if the slot is empty and the value
/// is not blank.
fn fill(slot: &mut Option<String>, value: &str) {
    let value = value.trim();
    if slot.is_none() && !value.is_empty() {
        *slot = Some(value.to_owned());
    }
}
