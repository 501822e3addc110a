use crate::listings::ScrapeError;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Upper bounds on one `get_record` call. `None` means no bound on that axis;
/// with both unset the finder keeps trying until it succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: Option<u32>,
    pub max_elapsed: Option<Duration>,
}

impl RetryPolicy {
    #[cfg(test)]
    pub fn unbounded() -> Self {
        Self {
            max_attempts: None,
            max_elapsed: None,
        }
    }

    #[cfg(test)]
    pub fn attempts(max: u32) -> Self {
        Self {
            max_attempts: Some(max),
            max_elapsed: None,
        }
    }

    pub fn start(&self) -> RetryBudget {
        RetryBudget {
            policy: *self,
            started: Instant::now(),
            attempts: 0,
            last_error: None,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Some(50),
            max_elapsed: Some(Duration::from_secs(120)),
        }
    }
}

/// Attempt counter for a single request. Each discovery attempt draws one
/// unit from it.
#[derive(Debug)]
pub struct RetryBudget {
    policy: RetryPolicy,
    started: Instant,
    attempts: u32,
    last_error: Option<ScrapeError>,
}

impl RetryBudget {
    /// Claims the next attempt, or reports why no attempt is left.
    pub fn try_begin(&mut self) -> Result<u32, Exhausted> {
        let over_attempts = self
            .policy
            .max_attempts
            .is_some_and(|max| self.attempts >= max);
        let over_time = self
            .policy
            .max_elapsed
            .is_some_and(|max| self.started.elapsed() >= max);

        if over_attempts || over_time {
            return Err(self.exhausted());
        }

        self.attempts += 1;
        Ok(self.attempts)
    }

    pub fn record_failure(&mut self, err: ScrapeError) {
        self.last_error = Some(err);
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Gives up now, e.g. when the last failure can never succeed on retry.
    pub fn exhausted(&mut self) -> Exhausted {
        Exhausted {
            attempts: self.attempts,
            elapsed: self.started.elapsed(),
            last_error: self.last_error.take(),
        }
    }
}

/// Returned instead of blocking forever when the budget runs out.
#[derive(Debug, Error)]
#[error("gave up after {attempts} attempts in {elapsed:?}{}", last_error_suffix(.last_error))]
pub struct Exhausted {
    pub attempts: u32,
    pub elapsed: Duration,
    pub last_error: Option<ScrapeError>,
}

fn last_error_suffix(err: &Option<ScrapeError>) -> String {
    match err {
        Some(e) => format!(" (last error: {e})"),
        None => String::new(),
    }
}
