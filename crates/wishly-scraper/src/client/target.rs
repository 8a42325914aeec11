//! Input URL resolution for product page fetches.

use crate::error::ScraperError;

/// A user-supplied product URL after scheme defaulting and parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUrl {
    /// The scheme-prefixed URL string that will be fetched.
    pub url: String,
    /// Lowercased host, plus the port whenever the input spells one out
    /// (default ports included).
    pub domain: String,
}

/// Resolves raw user input into a fetchable URL.
///
/// Input is trimmed and, when it starts with neither `http://` nor
/// `https://`, prefixed with `https://`.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if the result does not parse or has
/// no host.
pub fn resolve_target_url(input: &str) -> Result<TargetUrl, ScraperError> {
    let trimmed = input.trim();
    let url = if has_http_scheme(trimmed) {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = reqwest::Url::parse(&url).map_err(|e| ScraperError::InvalidUrl {
        url: url.clone(),
        reason: e.to_string(),
    })?;

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ScraperError::InvalidUrl {
            url,
            reason: "URL has no host".to_string(),
        });
    }

    let domain = network_location(&url).to_lowercase();
    Ok(TargetUrl { url, domain })
}

/// Host and port exactly as written in `url`, minus any userinfo.
///
/// Read from the raw text because URL parsing drops a port that matches the
/// scheme default (`https://shop.com:443/` would report `shop.com`).
fn network_location(url: &str) -> &str {
    let after_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let authority = after_scheme
        .split(['/', '?', '#', '\\'])
        .next()
        .unwrap_or_default();
    authority
        .rsplit_once('@')
        .map_or(authority, |(_, host_port)| host_port)
}

fn has_http_scheme(s: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        s.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
