//! Strategy 1: Open Graph and `product:` meta tags.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::types::ExtractionDraft;

static META_WITH_PROPERTY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta[property]").expect("valid selector"));

const TITLE_PROPERTIES: [&str; 1] = ["og:title"];
const IMAGE_PROPERTIES: [&str; 1] = ["og:image"];
const PRICE_PROPERTIES: [&str; 2] = ["product:price:amount", "og:price:amount"];
const CURRENCY_PROPERTIES: [&str; 2] = ["product:price:currency", "og:price:currency"];

pub(super) fn apply(document: &Html, draft: &mut ExtractionDraft) {
    let tags: Vec<(&str, &str)> = document
        .select(&META_WITH_PROPERTY)
        .filter_map(|el| {
            let meta = el.value();
            Some((meta.attr("property")?, meta.attr("content").unwrap_or_default()))
        })
        .collect();

    if let Some(content) = content_for(&tags, &TITLE_PROPERTIES) {
        draft.fill_name(content);
    }
    if let Some(content) = content_for(&tags, &IMAGE_PROPERTIES) {
        draft.fill_image_url(content);
    }
    if let Some(content) = content_for(&tags, &PRICE_PROPERTIES) {
        draft.fill_price_text(content);
    }
    if let Some(content) = content_for(&tags, &CURRENCY_PROPERTIES) {
        draft.fill_currency(content);
    }
}

/// Content of the first tag carrying the first property in `properties`
/// that appears on the page at all.
fn content_for<'a>(tags: &[(&'a str, &'a str)], properties: &[&str]) -> Option<&'a str> {
    properties.iter().find_map(|wanted| {
        tags.iter()
            .find(|(property, _)| property == wanted)
            .map(|&(_, content)| content)
    })
}
