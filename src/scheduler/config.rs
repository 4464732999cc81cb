use std::time::Duration;

use reqwest::Url;

use crate::args::{PositiveUsize, Strategy, TesterArgs};
use crate::error::{AppError, AppResult, ValidationError};

/// Immutable settings for one run, validated before the scheduler starts.
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub url: Url,
    pub total_requests: u64,
    pub concurrency: PositiveUsize,
    /// Per-request budget covering connect, response and body.
    pub timeout: Duration,
    /// Admission cutoff measured from run start; zero means unbounded.
    pub max_duration: Duration,
    pub strategy: Strategy,
}

impl TestConfig {
    /// Builds the run configuration from parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is missing, malformed, not HTTP(S), or
    /// has no host.
    pub fn from_args(args: &TesterArgs) -> AppResult<Self> {
        let raw_url = args
            .url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::validation(ValidationError::MissingUrl))?;
        let url = parse_target_url(raw_url)?;

        Ok(Self {
            url,
            total_requests: args.requests,
            concurrency: args.concurrency,
            timeout: args.request_timeout,
            max_duration: args.max_duration,
            strategy: args.strategy,
        })
    }

    /// The admission cutoff, if one is configured.
    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        if self.max_duration.is_zero() {
            None
        } else {
            Some(self.max_duration)
        }
    }
}

fn parse_target_url(raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw).map_err(|err| {
        AppError::validation(ValidationError::InvalidUrl {
            url: raw.to_owned(),
            source: err,
        })
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::validation(ValidationError::UnsupportedScheme {
            url: raw.to_owned(),
            scheme: url.scheme().to_owned(),
        }));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(AppError::validation(ValidationError::UrlMissingHost {
            url: raw.to_owned(),
        }));
    }
    Ok(url)
}
