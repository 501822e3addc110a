mod client;
mod discover;
mod extract;
mod finder;
mod models;
mod retry;
mod scrape_error;

pub use client::{HttpSource, PageSource, DEFAULT_REFERER, DEFAULT_USER_AGENT};
pub use discover::Discoverer;
pub use extract::{Extractor, VALUE_CEILING};
pub use finder::PropertyFinder;
pub use models::{CandidateLink, FactsMatch, PropertyRecord};
pub use retry::{Exhausted, RetryBudget, RetryPolicy};
pub use scrape_error::ScrapeError;

use scraper::Html;

/// Parses a page and serializes it back out, so pattern matching sees the
/// same normalized markup regardless of how the source formatted it.
pub fn render_markup(body: &str) -> String {
    Html::parse_document(body).html()
}
