//! Strategy 2: schema.org `Product` objects in JSON-LD blocks.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde_json::Value;

use crate::types::ExtractionDraft;

static LD_JSON_SCRIPT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid selector")
});

pub(super) fn apply(document: &Html, draft: &mut ExtractionDraft) {
    for script in document.select(&LD_JSON_SCRIPT) {
        let raw: String = script.text().collect();
        let value: Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed JSON-LD block");
                continue;
            }
        };

        for item in candidates(value) {
            if is_product(&item) {
                fill_from_product(&item, draft);
            }
        }
    }
}

/// Flattens a JSON-LD payload into the objects worth inspecting: the payload
/// itself or its array elements, plus members of any top-level `@graph`.
fn candidates(value: Value) -> Vec<Value> {
    let mut items = match value {
        Value::Array(items) => items,
        other => vec![other],
    };

    let graph_members: Vec<Value> = items
        .iter()
        .filter_map(|item| item.get("@graph").and_then(Value::as_array))
        .flatten()
        .cloned()
        .collect();
    items.extend(graph_members);

    items
}

/// `@type` may be a string or an array of strings.
fn is_product(item: &Value) -> bool {
    match item.get("@type") {
        Some(Value::String(t)) => t.eq_ignore_ascii_case("Product"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.eq_ignore_ascii_case("Product")),
        _ => false,
    }
}

fn fill_from_product(item: &Value, draft: &mut ExtractionDraft) {
    if let Some(name) = item.get("name").and_then(scalar_text) {
        draft.fill_name(&name);
    }

    if let Some(image) = item.get("image").and_then(image_url) {
        draft.fill_image_url(image);
    }

    let offer = match item.get("offers") {
        Some(Value::Array(offers)) => offers.first(),
        other => other,
    };
    let Some(offer) = offer.filter(|o| o.is_object()) else {
        return;
    };

    // Aggregate offers carry a range instead of a single price.
    let price = offer
        .get("price")
        .and_then(scalar_text)
        .or_else(|| offer.get("lowPrice").and_then(scalar_text));
    if let Some(price) = price {
        draft.fill_price_text(&price);
    }

    if let Some(currency) = offer.get("priceCurrency").and_then(Value::as_str) {
        draft.fill_currency(currency);
    }
}

/// Strings as-is, numbers in their JSON form (`12.5` → `"12.5"`).
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `image` may be a URL, a list (first entry wins), or an `ImageObject`.
fn image_url(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Array(images) => images.first().and_then(image_url),
        Value::Object(_) => value.get("url").and_then(Value::as_str),
        _ => None,
    }
}
