// extract.rs
use crate::listings::{
    render_markup, CandidateLink, FactsMatch, PageSource, PropertyRecord, ScrapeError,
};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

pub const VALUE_CEILING: u64 = 20_000_000;

/// Full resolution listing photos are served with a `_960.jpg` suffix.
static PHOTO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^,\s"'<>]+_960\.jpg"#).unwrap());

// "$450,000 3 beds, 2 baths, 1,850 Square Feet single family home located at
//  123 Main St, Springfield, IL 62701", or the short form
// "$375,000 4 bd 2 ba 2,139 sqft located at 4933 W Melody Ln, Laveen, AZ 85339"
static FACTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?x)
        (?P<value>\$\d{1,3}(?:,\d{3})*)\s+
        (?P<beds>\d+)\s*(?:bd|beds?)\b,?\s+
        (?P<baths>\d+)\s*(?:ba|baths?)\b,?\s+
        (?P<sqft>\d[\d,]*)\s*(?:sqft|Square\s+Feet)\b
        [^$<>"]*?
        located\s+at\s+
        (?P<address>[\w\s.,\#'-]+?),\s+
        (?P<city>[\w\s.'-]+?),\s+
        (?P<state>[A-Z]{2})\s+
        (?P<zipcode>\d{5}(?:-\d{4})?)\b
        "#,
    )
    .unwrap()
});

/// Turns a listing detail page into a `PropertyRecord`.
#[derive(Debug, Clone)]
pub struct Extractor {
    ceiling: u64,
    min_photos: usize,
}

#[cfg(test)]
impl Default for Extractor {
    fn default() -> Self {
        Self::new(VALUE_CEILING, 0)
    }
}

impl Extractor {
    pub fn new(ceiling: u64, min_photos: usize) -> Self {
        Self {
            ceiling,
            min_photos,
        }
    }

    /// Fetches the detail page, then extracts from it.
    pub fn extract<S>(
        &self,
        link: &CandidateLink,
        source: &S,
    ) -> Result<PropertyRecord, ScrapeError>
    where
        S: PageSource + ?Sized,
    {
        let body = source.fetch(link.as_str())?;
        self.extract_from_page(link, &body)
    }

    /// All-or-nothing: either every fact is captured from one sentence and the
    /// price is in range, or there is no record.
    pub fn extract_from_page(
        &self,
        link: &CandidateLink,
        body: &str,
    ) -> Result<PropertyRecord, ScrapeError> {
        let rendered = render_markup(body);

        let photos = photo_links(&rendered);

        let facts = facts(&rendered).ok_or_else(|| ScrapeError::FactsMismatch {
            url: link.to_string(),
        })?;

        let value = parse_currency(&facts.value)?;
        if value == 0 || value > self.ceiling {
            return Err(ScrapeError::ValueOutOfRange {
                value,
                ceiling: self.ceiling,
            });
        }

        if photos.len() < self.min_photos {
            return Err(ScrapeError::TooFewPhotos {
                url: link.to_string(),
                found: photos.len(),
                required: self.min_photos,
            });
        }

        Ok(PropertyRecord::from_facts(link, facts, value, photos))
    }
}

/// Distinct photo URLs in the page.
pub fn photo_links(text: &str) -> BTreeSet<String> {
    PHOTO_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// First facts sentence in the page, if there is one.
pub fn facts(text: &str) -> Option<FactsMatch> {
    let caps = FACTS_RE.captures(text)?;
    let group = |name: &str| caps.name(name).map(|m| m.as_str().trim().to_string());

    Some(FactsMatch {
        value: group("value")?,
        beds: group("beds")?,
        baths: group("baths")?,
        sqft: group("sqft")?,
        address: group("address")?,
        city: group("city")?,
        state: group("state")?,
        zipcode: group("zipcode")?,
    })
}

/// "$1,234,567" -> 1234567
pub fn parse_currency(raw: &str) -> Result<u64, ScrapeError> {
    let digits: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    digits.parse::<u64>().map_err(|_| ScrapeError::InvalidValue {
        raw: raw.to_string(),
    })
}
