// client.rs
use crate::listings::ScrapeError;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 8.0.0; SM-G960F Build/R16NW) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/62.0.3202.84 Mobile Safari/537.36";
pub const DEFAULT_REFERER: &str = "https://www.google.com/";

/// Something that can hand back the body of a page.
pub trait PageSource: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, ScrapeError>;
}

/// Blocking HTTP source. The listing site rejects requests that don't look
/// like they came from a browser, so every request carries the same
/// user-agent and referer.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(user_agent: &str, referer: &str, timeout: Duration) -> Result<Self, ScrapeError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent).map_err(|e| ScrapeError::transport("<client>", e))?,
        );
        headers.insert(
            REFERER,
            HeaderValue::from_str(referer).map_err(|e| ScrapeError::transport("<client>", e))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ScrapeError::transport("<client>", e))?;

        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let start = std::time::Instant::now();

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| ScrapeError::transport(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let text = resp.text().map_err(|e| ScrapeError::transport(url, e))?;

        log::debug!(
            "fetched {url} ({} bytes) in {:?}",
            text.len(),
            start.elapsed()
        );

        Ok(text)
    }
}
