// discover.rs
use crate::cities::CityPool;
use crate::listings::{
    render_markup, CandidateLink, Exhausted, PageSource, RetryBudget, ScrapeError,
};
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;

/// Finds a random listing by way of a random city's search page.
pub struct Discoverer {
    base_url: String,
    detail_link: Regex,
}

impl Discoverer {
    /// `base_url` is the site root, e.g. `https://www.zillow.com`.
    pub fn new(base_url: &str) -> Result<Self, regex::Error> {
        let base_url = base_url.trim_end_matches('/').to_string();

        // Search pages embed their results as JSON: "detailUrl":"https://.../homedetails/..."
        let pattern = format!(
            r#""detailUrl":"({}/homedetails/[^"]+)""#,
            regex::escape(&base_url)
        );
        let detail_link = Regex::new(&pattern)?;

        Ok(Self {
            base_url,
            detail_link,
        })
    }

    pub fn search_url(&self, city: &str) -> String {
        format!("{}/{}/", self.base_url, city)
    }

    /// All detail links embedded in a search page, in page order.
    pub fn detail_links(&self, body: &str) -> Vec<CandidateLink> {
        let rendered = render_markup(body);

        self.detail_link
            .captures_iter(&rendered)
            .filter_map(|caps| caps.get(1))
            .map(|m| CandidateLink::new(m.as_str()))
            .collect()
    }

    /// One discovery iteration: random city, fetch its search page, random link.
    pub fn attempt<S, R>(
        &self,
        pool: &CityPool,
        source: &S,
        rng: &mut R,
    ) -> Result<CandidateLink, ScrapeError>
    where
        S: PageSource + ?Sized,
        R: Rng + ?Sized,
    {
        let city = pool.choose(rng).ok_or(ScrapeError::EmptyPool)?;
        let url = self.search_url(city);

        let body = source.fetch(&url)?;
        let links = self.detail_links(&body);

        log::debug!("{} detail links on {url}", links.len());

        links
            .choose(rng)
            .cloned()
            .ok_or(ScrapeError::EmptyDiscovery { url })
    }

    /// Repeats `attempt` until a link turns up or the budget is spent.
    pub fn discover<S, R>(
        &self,
        pool: &CityPool,
        source: &S,
        rng: &mut R,
        budget: &mut RetryBudget,
    ) -> Result<CandidateLink, Exhausted>
    where
        S: PageSource + ?Sized,
        R: Rng + ?Sized,
    {
        loop {
            let attempt = budget.try_begin()?;

            match self.attempt(pool, source, rng) {
                Ok(link) => return Ok(link),
                Err(e) => {
                    log::warn!("discovery attempt {attempt} failed [{}]: {e}", e.kind());
                    let retryable = e.is_retryable();
                    budget.record_failure(e);
                    if !retryable {
                        return Err(budget.exhausted());
                    }
                }
            }
        }
    }
}
