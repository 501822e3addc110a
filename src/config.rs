//! Runtime configuration, read from the environment (and `.env` when present).

use crate::listings::{RetryPolicy, DEFAULT_REFERER, DEFAULT_USER_AGENT, VALUE_CEILING};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}={value:?} is not valid: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub cities_path: PathBuf,
    pub base_url: Url,
    pub user_agent: String,
    pub referer: String,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
    pub value_ceiling: u64,
    pub min_photos: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_attempts: u32 = parse_or(&lookup, "MAX_ATTEMPTS", 50)?;
        let max_elapsed_secs: u64 = parse_or(&lookup, "MAX_ELAPSED_SECS", 120)?;

        // 0 turns a bound off
        let retry = RetryPolicy {
            max_attempts: (max_attempts > 0).then_some(max_attempts),
            max_elapsed: (max_elapsed_secs > 0).then(|| Duration::from_secs(max_elapsed_secs)),
        };

        let base_raw = lookup("SOURCE_BASE_URL").unwrap_or_else(|| "https://www.zillow.com".into());
        let base_url = Url::parse(&base_raw).map_err(|e| ConfigError::Invalid {
            key: "SOURCE_BASE_URL",
            value: base_raw.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            bind_addr: parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 5000)))?,
            max_workers: parse_or(&lookup, "MAX_WORKERS", 8)?,
            cities_path: lookup("CITIES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("cities.txt")),
            base_url,
            user_agent: lookup("SOURCE_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.into()),
            referer: lookup("SOURCE_REFERER").unwrap_or_else(|| DEFAULT_REFERER.into()),
            request_timeout: Duration::from_secs(parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?),
            retry,
            value_ceiling: parse_or(&lookup, "VALUE_CEILING", VALUE_CEILING)?,
            min_photos: parse_or(&lookup, "MIN_PHOTOS", 0)?,
        })
    }

    /// Site root without a trailing slash, e.g. `https://www.zillow.com`.
    pub fn base_url_str(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None).unwrap();

        assert_eq!(config.bind_addr.port(), 5000);
        assert_eq!(config.base_url_str(), "https://www.zillow.com");
        assert_eq!(config.value_ceiling, 20_000_000);
        assert_eq!(config.min_photos, 0);
        assert_eq!(config.retry, RetryPolicy::default());
        assert_eq!(config.referer, "https://www.google.com/");
    }

    #[test]
    fn zero_disables_retry_bounds() {
        let config = Config::from_lookup(lookup_from(&[
            ("MAX_ATTEMPTS", "0"),
            ("MAX_ELAPSED_SECS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.retry, RetryPolicy::unbounded());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("MAX_ATTEMPTS", "5"),
            ("MIN_PHOTOS", "3"),
            ("CITIES_PATH", "/etc/listings/cities.txt"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.retry.max_attempts, Some(5));
        assert_eq!(config.min_photos, 3);
        assert_eq!(config.cities_path, PathBuf::from("/etc/listings/cities.txt"));
    }

    #[test]
    fn bad_values_name_the_variable() {
        let err = Config::from_lookup(lookup_from(&[("MAX_WORKERS", "lots")])).unwrap_err();
        assert!(err.to_string().starts_with("MAX_WORKERS="));

        let err = Config::from_lookup(lookup_from(&[("SOURCE_BASE_URL", "not a url")])).unwrap_err();
        assert!(err.to_string().contains("SOURCE_BASE_URL"));
    }
}
