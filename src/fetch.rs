//! # Registry Document Fetching
//!
//! Downloads the registry document over HTTP with a capped retry budget.
//! The retry behavior is a pure configuration value ([`RetryPolicy`]) kept
//! apart from the call site, so the backoff schedule can be tested without
//! touching the network.
//!
//! This is the only place in the pipeline where anything is retried: a
//! transient network failure is worth another attempt, while every other
//! anomaly (malformed record, zero-entry scan) is surfaced to the caller
//! untouched. Exhausting the budget is fatal; the scanner is never handed a
//! partial document.

use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;

use crate::error::{Error, Result};

/// How the delay between attempts grows.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backoff {
    /// Same delay before every retry.
    #[default]
    Fixed,
    /// Delay doubles after each failed attempt.
    Exponential,
}

/// A capped retry budget with its backoff schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts allowed. At least one attempt is always made.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub delay: Duration,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            delay: Duration::from_secs(2),
            backoff: Backoff::Fixed,
        }
    }
}

impl RetryPolicy {
    /// The delay to wait after `failed_attempt` (1-based) before retrying,
    /// or `None` when the budget is spent.
    pub fn delay_before_retry(&self, failed_attempt: u32) -> Option<Duration> {
        if failed_attempt >= self.max_attempts {
            return None;
        }
        let delay = match self.backoff {
            Backoff::Fixed => self.delay,
            Backoff::Exponential => self
                .delay
                .saturating_mul(2u32.saturating_pow(failed_attempt.saturating_sub(1))),
        };
        Some(delay)
    }
}

/// Fetch the registry document, retrying per `policy`.
///
/// # Errors
///
/// Returns [`Error::Fetch`] with the attempt count once the retry budget is
/// exhausted, or immediately if the HTTP client cannot be constructed.
pub fn fetch_registry(url: &str, policy: &RetryPolicy) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("registry-sync/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| Error::Fetch {
            url: url.to_string(),
            attempts: 0,
            message: e.to_string(),
        })?;

    let mut attempt = 0;
    loop {
        attempt += 1;
        match try_fetch(&client, url) {
            Ok(body) => return Ok(body),
            Err(message) => match policy.delay_before_retry(attempt) {
                Some(delay) => {
                    log::warn!(
                        "fetch attempt {}/{} failed for {}: {}; retrying in {:?}",
                        attempt,
                        policy.max_attempts,
                        url,
                        message,
                        delay
                    );
                    thread::sleep(delay);
                }
                None => {
                    return Err(Error::Fetch {
                        url: url.to_string(),
                        attempts: attempt,
                        message,
                    })
                }
            },
        }
    }
}

/// One fetch attempt. Non-2xx statuses count as failures.
fn try_fetch(client: &reqwest::blocking::Client, url: &str) -> std::result::Result<String, String> {
    let response = client.get(url).send().map_err(|e| e.to_string())?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("unexpected status {}", status));
    }
    response.text().map_err(|e| e.to_string())
}
