use crate::listings::{PageSource, ScrapeError};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

/// Scripted `PageSource`. Known URLs return their pages in the order they
/// were added, repeating the last one; URLs marked failing return a
/// transport error; anything else is a 404.
#[derive(Default)]
pub struct StubSource {
    pages: Mutex<HashMap<String, VecDeque<String>>>,
    failing: HashSet<String>,
    fetched: Mutex<Vec<String>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, body: String) -> Self {
        self.pages
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(body);
        self
    }

    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetched.lock().unwrap().len()
    }

    pub fn fetches_of(&self, url: &str) -> usize {
        self.fetched.lock().unwrap().iter().filter(|u| *u == url).count()
    }
}

impl PageSource for StubSource {
    fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        self.fetched.lock().unwrap().push(url.to_string());

        if self.failing.contains(url) {
            return Err(ScrapeError::transport(url, "connection reset by peer"));
        }

        let mut pages = self.pages.lock().unwrap();
        let queue = pages.get_mut(url).ok_or_else(|| ScrapeError::Status {
            url: url.to_string(),
            status: 404,
        })?;

        let body = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };

        body.ok_or_else(|| ScrapeError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

/// Search results page embedding the given detail links the way the site does.
pub fn search_page(links: &[String]) -> String {
    let results: Vec<String> = links
        .iter()
        .enumerate()
        .map(|(i, link)| format!(r#"{{"zpid":"{i}","detailUrl":"{link}","statusType":"FOR_SALE"}}"#))
        .collect();

    format!(
        r#"<!DOCTYPE html><html><head><title>Homes for sale</title></head><body>
<div id="grid-search-results"></div>
<script id="__NEXT_DATA__" type="application/json">{{"listResults":[{}]}}</script>
</body></html>"#,
        results.join(",")
    )
}

/// Minimal detail page carrying one facts sentence and two photos.
pub fn detail_page(facts: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>Listing</title></head><body>
<img src="https://photos.zillowstatic.com/fp/p1-cc_ft_960.jpg">
<img src="https://photos.zillowstatic.com/fp/p2-cc_ft_960.jpg">
<p>{facts}</p>
</body></html>"#
    )
}
