//! Strategy 4: page `<title>`, minus any trailing site name.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::parse::strip_title_suffix;
use crate::types::ExtractionDraft;

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid selector"));

pub(super) fn apply(document: &Html, draft: &mut ExtractionDraft) {
    if draft.name.is_some() {
        return;
    }
    if let Some(title) = document.select(&TITLE).next() {
        let raw: String = title.text().collect();
        draft.fill_name(strip_title_suffix(&raw));
    }
}
