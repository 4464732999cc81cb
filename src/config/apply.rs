use clap::ArgMatches;
use clap::parser::ValueSource;
use std::time::Duration;

use crate::args::{PositiveUsize, TesterArgs, parsers::ensure_concurrency_bound};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, DurationValue};

/// Applies configuration values to CLI arguments. Values given on the command
/// line or through environment variables win over the file.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_config(
    args: &mut TesterArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_explicit(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_explicit(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = requests;
    }

    if !is_explicit(matches, "concurrency")
        && let Some(concurrency) = config.concurrency
    {
        args.concurrency = ensure_concurrency(concurrency)?;
    }

    if !is_explicit(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = config_duration(timeout, "timeout", false)?;
    }

    if !is_explicit(matches, "max_duration")
        && let Some(duration) = config.duration.as_ref()
    {
        args.max_duration = config_duration(duration, "duration", true)?;
    }

    if !is_explicit(matches, "strategy")
        && let Some(strategy) = config.strategy
    {
        args.strategy = strategy;
    }

    if !is_explicit(matches, "progress_every")
        && let Some(progress_every) = config.progress_every
    {
        args.progress_every = progress_every;
    }

    if !is_explicit(matches, "interrupt_grace")
        && let Some(grace) = config.interrupt_grace.as_ref()
    {
        args.interrupt_grace = config_duration(grace, "interrupt_grace", true)?;
    }

    if !is_explicit(matches, "output_format")
        && let Some(format) = config.output_format
    {
        args.output_format = format;
    }

    if !is_explicit(matches, "output")
        && let Some(output) = config.output.clone()
    {
        args.output = Some(output);
    }

    Ok(())
}

fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn ensure_concurrency(value: usize) -> AppResult<PositiveUsize> {
    let positive = PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: "concurrency".to_owned(),
            source: err,
        })
    })?;
    ensure_concurrency_bound(positive)
}

fn config_duration(value: &DurationValue, field: &str, allow_zero: bool) -> AppResult<Duration> {
    let parsed = if allow_zero {
        value.to_optional_duration()
    } else {
        value.to_duration()
    };
    parsed.map_err(|err| {
        AppError::config(ConfigError::InvalidDuration {
            field: field.to_owned(),
            source: err,
        })
    })
}
