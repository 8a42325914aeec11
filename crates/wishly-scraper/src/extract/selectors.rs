//! Strategy 3: CSS selector fallbacks.
//!
//! Each list is tried in order and only the first element matching a given
//! selector is inspected. `._2YkNt` and `._1k4dP` are one marketplace's
//! generated class names; expect them to stop matching whenever that site
//! rebuilds its frontend.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::compile_selectors;
use crate::parse::joined_text;
use crate::types::ExtractionDraft;

pub const NAME_SELECTORS: &[&str] = &[
    "h1.product-title",
    "h1.product-name",
    "h1[class*='title']",
    "h1[class*='name']",
    "h1[class*='product']",
    "h1",
    "[data-testid='product-title']",
    "[class*='ProductTitle']",
    "._2YkNt",
    "[class*='goods-title']",
];

pub const PRICE_SELECTORS: &[&str] = &[
    "[class*='price']:not([class*='original']):not([class*='was'])",
    "[data-testid*='price']",
    "[class*='Price']",
    "span.price",
    ".product-price",
    ".current-price",
    "._1k4dP",
    "[class*='sale-price']",
];

pub const IMAGE_SELECTORS: &[&str] = &[
    "img[class*='product']",
    "img[class*='main']",
    ".product-image img",
    "#main-image",
    "img[data-main]",
];

static NAME: LazyLock<Vec<Selector>> = LazyLock::new(|| compile_selectors(NAME_SELECTORS));
static PRICE: LazyLock<Vec<Selector>> = LazyLock::new(|| compile_selectors(PRICE_SELECTORS));
static IMAGE: LazyLock<Vec<Selector>> = LazyLock::new(|| compile_selectors(IMAGE_SELECTORS));

pub(super) fn apply(document: &Html, draft: &mut ExtractionDraft) {
    if draft.name.is_none() {
        if let Some(name) = first_text(document, &NAME) {
            draft.fill_name(&name);
        }
    }
    if draft.price_text.is_none() {
        if let Some(price) = first_text(document, &PRICE) {
            draft.fill_price_text(&price);
        }
    }
    if draft.image_url.is_none() {
        if let Some(src) = first_src(document, &IMAGE) {
            draft.fill_image_url(src);
        }
    }
}

fn first_text(document: &Html, selectors: &[Selector]) -> Option<String> {
    selectors.iter().find_map(|selector| {
        let element = document.select(selector).next()?;
        let text = joined_text(element.text());
        (!text.is_empty()).then_some(text)
    })
}

fn first_src<'a>(document: &'a Html, selectors: &[Selector]) -> Option<&'a str> {
    selectors.iter().find_map(|selector| {
        document
            .select(selector)
            .next()?
            .value()
            .attr("src")
            .filter(|src| !src.trim().is_empty())
    })
}
