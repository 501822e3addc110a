use thiserror::Error;

/// Everything that can go wrong while looking for a listing.
///
/// The finder retries all of these the same way, but keeps them apart so the
/// logs say which stage failed and why.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("network error fetching {url}: {message}")]
    Transport { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("no detail links on search page {url}")]
    EmptyDiscovery { url: String },

    #[error("no facts sentence on {url}")]
    FactsMismatch { url: String },

    #[error("unparseable price {raw:?}")]
    InvalidValue { raw: String },

    #[error("price {value} outside 1..={ceiling}")]
    ValueOutOfRange { value: u64, ceiling: u64 },

    #[error("only {found} photos on {url}, need {required}")]
    TooFewPhotos {
        url: String,
        found: usize,
        required: usize,
    },

    #[error("city pool is empty")]
    EmptyPool,
}

impl ScrapeError {
    /// Short stable label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ScrapeError::Transport { .. } => "transport",
            ScrapeError::Status { .. } => "status",
            ScrapeError::EmptyDiscovery { .. } => "empty_discovery",
            ScrapeError::FactsMismatch { .. } => "facts_mismatch",
            ScrapeError::InvalidValue { .. } => "invalid_value",
            ScrapeError::ValueOutOfRange { .. } => "value_out_of_range",
            ScrapeError::TooFewPhotos { .. } => "too_few_photos",
            ScrapeError::EmptyPool => "empty_pool",
        }
    }

    /// An empty pool can never produce a link, so there is nothing to retry.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ScrapeError::EmptyPool)
    }

    pub fn transport(url: &str, err: impl std::fmt::Display) -> Self {
        ScrapeError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}
