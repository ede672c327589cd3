//! Bananina listing and detail pages: parsing, the browser session, and the
//! per-category pipeline tying them together.

use scraper::{ElementRef, Selector};

mod detail;
pub use detail::{fetch_details, COMPLETENESS_LABEL, LIST_DELIMITER, MEASUREMENT_NOTE};

mod item;
pub use item::{MEDIA_BASE_URL, PLACEHOLDER_IMAGE};

mod listing;
pub use listing::{CatalogListing, ProductFragment};

mod pipeline;
pub use pipeline::{
    run_category, run_in_session, scrape_all, scrape_category, CategoryReport, ScrapeSummary,
};

mod session;
pub use session::{BrowserSession, ChromeSession};

/// Compiles one of the fixed selectors used by the parsers.
fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("catalog: invalid built-in selector")
}

fn first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    scope.select(&selector(css)).next()
}

/// Element text with each text node trimmed and empty ones dropped.
fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect()
}

/// `li` texts of a list container, in document order.
fn list_items(scope: ElementRef<'_>) -> Vec<String> {
    scope.select(&selector("li")).map(text_of).collect()
}
