//! Currency code resolution for scraped prices.

/// Guesses an ISO 4217 currency code from price text and the page's domain.
///
/// Symbols and codes in `text` are checked before the domain, in a fixed
/// order where the first match wins:
///
/// | # | Condition | Result |
/// |---|-----------|--------|
/// | 1 | `₦` or `NGN` in text | `NGN` |
/// | 2 | `$` in text, no `USD` in text, domain not `.ng` | `USD` |
/// | 3 | `£` or `GBP` | `GBP` |
/// | 4 | `€` or `EUR` | `EUR` |
/// | 5 | `¥`, `CNY` or `JPY` | `CNY` |
/// | 6 | domain `.ng` / `.com.ng` | `NGN` |
/// | 7 | domain `.co.uk` / `.uk` | `GBP` |
/// | 8 | domain `.de`, `.fr` or `.eu` | `EUR` |
/// | 9 | anything else | `USD` |
///
/// Code matching in `text` is case-insensitive. Domain checks are plain
/// substring tests, so `shop.ng.example.com` counts as Nigerian.
#[must_use]
pub fn detect_currency(text: &str, domain: &str) -> &'static str {
    let upper = text.to_uppercase();

    if text.contains('₦') || upper.contains("NGN") {
        return "NGN";
    }
    if text.contains('$') && !upper.contains("USD") && !domain.contains(".ng") {
        return "USD";
    }
    if text.contains('£') || upper.contains("GBP") {
        return "GBP";
    }
    if text.contains('€') || upper.contains("EUR") {
        return "EUR";
    }
    if text.contains('¥') || upper.contains("CNY") || upper.contains("JPY") {
        return "CNY";
    }
    if domain.contains(".ng") || domain.contains(".com.ng") {
        return "NGN";
    }
    if domain.contains(".co.uk") || domain.contains(".uk") {
        return "GBP";
    }
    if domain.contains(".de") || domain.contains(".fr") || domain.contains(".eu") {
        return "EUR";
    }
    "USD"
}

/// Picks the currency for a scraped product.
///
/// A structured value (from page metadata) of exactly three characters is
/// upper-cased and used as-is. Anything else falls back to
/// [`detect_currency`] over the captured price text.
#[must_use]
pub fn resolve_currency(structured: Option<&str>, price_text: &str, domain: &str) -> String {
    match structured.map(str::trim) {
        Some(code) if code.chars().count() == 3 => code.to_uppercase(),
        _ => detect_currency(price_text, domain).to_owned(),
    }
}
