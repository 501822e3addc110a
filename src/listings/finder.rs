// finder.rs
use crate::cities::CityPool;
use crate::listings::{Discoverer, Exhausted, Extractor, PageSource, PropertyRecord, RetryPolicy};
use rand::Rng;
use std::sync::Arc;

/// Discover, extract, repeat until one listing checks out.
///
/// A failed extraction of any kind sends the loop back to discovery with a
/// fresh random city, so one bad listing never sinks the request. The only
/// way out without a record is running out of retry budget.
pub struct PropertyFinder<S> {
    source: S,
    pool: Arc<CityPool>,
    discoverer: Discoverer,
    extractor: Extractor,
    policy: RetryPolicy,
}

impl<S: PageSource> PropertyFinder<S> {
    pub fn new(
        source: S,
        pool: Arc<CityPool>,
        discoverer: Discoverer,
        extractor: Extractor,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            source,
            pool,
            discoverer,
            extractor,
            policy,
        }
    }

    pub fn pool(&self) -> &CityPool {
        &self.pool
    }

    #[cfg(test)]
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn get_record<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PropertyRecord, Exhausted> {
        let mut budget = self.policy.start();

        loop {
            let link = self
                .discoverer
                .discover(&self.pool, &self.source, rng, &mut budget)?;

            match self.extractor.extract(&link, &self.source) {
                Ok(record) => {
                    log::info!(
                        "✅ found listing after {} attempts in {:?}: {} ({})",
                        budget.attempts(),
                        budget.elapsed(),
                        record.address,
                        record.value
                    );
                    return Ok(record);
                }
                Err(e) => {
                    log::warn!("extraction failed [{}] for {link}: {e}", e.kind());
                    budget.record_failure(e);
                }
            }
        }
    }
}
