use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Link to a single listing's detail page, as found on a search page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateLink(String);

impl CandidateLink {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[cfg(test)]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for CandidateLink {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// facts sentence
//  ├── value        "$1,234,567"
//  ├── beds         "3"
//  ├── baths        "2"
//  ├── sqft         "1,850"
//  └── located at
//       ├── address "123 Main St"
//       ├── city    "Springfield"
//       ├── state   "IL"
//       └── zipcode "62701"

/// Raw captures of one facts-sentence match. Every field is present or the
/// match did not happen at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactsMatch {
    pub value: String,
    pub beds: String,
    pub baths: String,
    pub sqft: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
}

impl FactsMatch {
    /// "City, ST 12345"
    pub fn city_state_zipcode(&self) -> String {
        format!("{}, {} {}", self.city, self.state, self.zipcode)
    }
}

/// One validated listing, serialized as the `/property_info` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyRecord {
    #[serde(rename = "urls")]
    pub photo_links: BTreeSet<String>,
    pub value: u64,
    pub beds: String,
    pub baths: String,
    pub square_footage: String,
    pub address: String,
    pub city_state_zipcode: String,
    #[serde(rename = "detailUrl")]
    pub detail_url: String,
}

impl PropertyRecord {
    /// Builds a record from a complete facts match and an already validated value.
    pub fn from_facts(
        link: &CandidateLink,
        facts: FactsMatch,
        value: u64,
        photo_links: BTreeSet<String>,
    ) -> Self {
        let city_state_zipcode = facts.city_state_zipcode();

        Self {
            photo_links,
            value,
            beds: facts.beds,
            baths: facts.baths,
            square_footage: facts.sqft,
            address: facts.address,
            city_state_zipcode,
            detail_url: link.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_facts() -> FactsMatch {
        FactsMatch {
            value: "$450,000".into(),
            beds: "3".into(),
            baths: "2".into(),
            sqft: "1,850".into(),
            address: "123 Main St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zipcode: "62701".into(),
        }
    }

    #[test]
    fn record_serializes_with_public_field_names() {
        let link = CandidateLink::new("https://www.zillow.com/homedetails/123-Main-St/1_zpid/");
        let photos: BTreeSet<String> =
            ["https://photos.zillowstatic.com/fp/a_960.jpg".to_string()].into();

        let record = PropertyRecord::from_facts(&link, sample_facts(), 450_000, photos);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["value"], 450_000);
        assert_eq!(json["beds"], "3");
        assert_eq!(json["square_footage"], "1,850");
        assert_eq!(json["city_state_zipcode"], "Springfield, IL 62701");
        assert_eq!(json["urls"].as_array().unwrap().len(), 1);
        assert_eq!(json["detailUrl"], link.as_str());
        assert!(json.get("photo_links").is_none());
    }
}
