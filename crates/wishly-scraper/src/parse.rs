//! Text normalization helpers for scraped product fields.
//!
//! See [`crate::extract`] for how these compose into the extraction pipeline.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

/// Maximum length of a normalized product name, in characters.
pub const MAX_NAME_CHARS: usize = 200;

static NON_PRICE_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.,]").expect("valid regex"));

/// Characters that separate a product title from a trailing site name,
/// e.g. `"Linen Shirt | StoreName"` or `"Linen Shirt – StoreName"`.
const TITLE_SEPARATORS: [char; 4] = ['|', '-', '–', '—'];

/// Parses a numeric price out of free-form price text such as `"$12.99"`
/// or `"₦45,000"`.
///
/// Rules, applied in order after stripping everything except ASCII digits,
/// `,` and `.`:
/// 1. Both `,` and `.` present: commas are thousands separators
///    (`"1,234.56"` → `1234.56`).
/// 2. A single comma followed by exactly two characters: the comma is a
///    decimal separator (`"45,00"` → `45.00`).
/// 3. Otherwise commas are thousands separators (`"45,000"` → `45000`).
///
/// Rule 2 misreads a thousands group of two (`"1,50"` is always 1.50). No
/// rule order is right for every locale.
///
/// Values beyond [`Decimal`]'s 28 significant digits (about 7.9e28) do not
/// fit and come back as `None` rather than a rounded figure.
///
/// Returns `None` when nothing parseable remains.
#[must_use]
pub fn extract_price(text: &str) -> Option<Decimal> {
    let cleaned = NON_PRICE_CHARS_RE.replace_all(text.trim(), "");

    let comma_count = cleaned.matches(',').count();
    let mut normalized = if comma_count > 0 && cleaned.contains('.') {
        cleaned.replace(',', "")
    } else if comma_count == 1 && cleaned.split(',').nth(1).is_some_and(|s| s.len() == 2) {
        cleaned.replace(',', ".")
    } else {
        cleaned.replace(',', "")
    };

    if !normalized.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    // Tolerate a bare leading or trailing point: ".5", "45."
    if normalized.starts_with('.') {
        normalized.insert(0, '0');
    }
    if normalized.ends_with('.') {
        normalized.pop();
    }

    Decimal::from_str(&normalized).ok()
}

/// Collapses whitespace runs into single spaces, trims, and truncates to
/// [`MAX_NAME_CHARS`] characters.
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(MAX_NAME_CHARS)
        .collect()
}

/// Returns the part of a page title before the first site-name separator.
#[must_use]
pub fn strip_title_suffix(title: &str) -> &str {
    title
        .split(TITLE_SEPARATORS)
        .next()
        .unwrap_or_default()
        .trim()
}

/// Concatenates an element's text fragments, trimming each one and dropping
/// the blanks. `<span>$</span> <b>12</b>` reads as `"$12"`.
pub(crate) fn joined_text<'a>(fragments: impl Iterator<Item = &'a str>) -> String {
    fragments
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
