//! Product metadata extraction from a fetched HTML page.
//!
//! Strategies run in a fixed order over one parsed document and write into a
//! shared [`ExtractionDraft`]. A field belongs to the first strategy that
//! finds a non-empty value for it:
//!
//! 1. Open Graph `<meta property=...>` tags
//! 2. JSON-LD `Product` blocks
//! 3. CSS selector fallbacks
//! 4. `<title>` text (name only)
//!
//! The draft is then normalized into a [`ScrapedProduct`]. No step here can
//! fail; a page with nothing recognizable yields empty fields.

mod jsonld;
mod opengraph;
mod selectors;
mod title;

use scraper::{Html, Selector};
use wishly_core::ScrapedProduct;

use crate::client::TargetUrl;
use crate::currency::resolve_currency;
use crate::parse::{extract_price, normalize_name};
use crate::types::ExtractionDraft;

pub use selectors::{IMAGE_SELECTORS, NAME_SELECTORS, PRICE_SELECTORS};

type Strategy = fn(&Html, &mut ExtractionDraft);

const STRATEGIES: [(&str, Strategy); 4] = [
    ("open_graph", opengraph::apply),
    ("json_ld", jsonld::apply),
    ("css_selectors", selectors::apply),
    ("title", title::apply),
];

/// Runs the full extraction cascade over `html` fetched from `target`.
#[must_use]
pub fn extract_product(html: &str, target: &TargetUrl) -> ScrapedProduct {
    let draft = collect_draft(html);
    finish(draft, target)
}

/// Runs every strategy over `html` and returns the raw captured values.
#[must_use]
pub fn collect_draft(html: &str) -> ExtractionDraft {
    let document = Html::parse_document(html);
    let mut draft = ExtractionDraft::default();

    for (name, strategy) in STRATEGIES {
        if draft.is_complete() {
            break;
        }
        strategy(&document, &mut draft);
        tracing::debug!(strategy = name, ?draft, "extraction strategy applied");
    }

    draft
}

fn finish(draft: ExtractionDraft, target: &TargetUrl) -> ScrapedProduct {
    let price_text = draft.price_text.as_deref().unwrap_or_default();
    let currency = resolve_currency(draft.currency.as_deref(), price_text, &target.domain);
    let price = draft.price_text.as_deref().and_then(extract_price);
    if price.is_none() && !price_text.is_empty() {
        tracing::debug!(price_text, "captured price text did not parse");
    }

    ScrapedProduct {
        name: draft.name.as_deref().map(normalize_name).unwrap_or_default(),
        price,
        currency,
        image_url: draft.image_url.unwrap_or_default(),
        url: target.url.clone(),
        source_domain: target.domain.clone(),
    }
}

/// Parses a list of selector strings, skipping (and logging) any that the
/// selector engine rejects.
fn compile_selectors(patterns: &[&str]) -> Vec<Selector> {
    patterns
        .iter()
        .filter_map(|pattern| match Selector::parse(pattern) {
            Ok(selector) => Some(selector),
            Err(e) => {
                tracing::warn!(pattern, error = ?e, "skipping invalid CSS selector");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../extract_test.rs"]
mod tests;
