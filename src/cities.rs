//! The pool of city identifiers searched for listings.
//!
//! Loaded once at startup from a line-per-city text file and never mutated
//! afterwards, so worker threads share it through an `Arc` without locking.

use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CityPoolError {
    #[error("failed to read city list {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("city list {0} has no entries")]
    Empty(String),
}

#[derive(Debug, Clone, Default)]
pub struct CityPool {
    cities: Vec<String>,
}

impl CityPool {
    /// One identifier per line. Surrounding whitespace is trimmed and blank
    /// lines are skipped; anything else is kept as written.
    pub fn from_lines(raw: &str) -> Self {
        let cities = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();

        Self { cities }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CityPoolError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CityPoolError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let pool = Self::from_lines(&raw);
        if pool.is_empty() {
            return Err(CityPoolError::Empty(path.display().to_string()));
        }

        log::info!("loaded {} cities from {}", pool.len(), path.display());
        Ok(pool)
    }

    /// Uniform pick; `None` only when the pool is empty.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.cities.choose(rng).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cities.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    #[test]
    fn trims_and_skips_blank_lines() {
        let pool = CityPool::from_lines("austin-tx\n\n  denver-co  \r\n\nboise-id\n");
        let cities: Vec<&str> = pool.iter().collect();
        assert_eq!(cities, vec!["austin-tx", "denver-co", "boise-id"]);
    }

    #[test]
    fn choose_on_empty_pool_is_none() {
        let pool = CityPool::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pool.choose(&mut rng).is_none());
    }

    #[test]
    fn choose_returns_members_only() {
        let pool = CityPool::from_lines("a\nb\nc");
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let city = pool.choose(&mut rng).unwrap();
            assert!(["a", "b", "c"].contains(&city));
        }
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seattle-wa").unwrap();
        writeln!(file, "portland-or").unwrap();

        let pool = CityPool::load(file.path()).unwrap();
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn load_rejects_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = CityPool::load(file.path()).unwrap_err();
        assert!(matches!(err, CityPoolError::Empty(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = CityPool::load("/definitely/not/here/cities.txt").unwrap_err();
        assert!(matches!(err, CityPoolError::Read { .. }));
    }
}
