use std::time::Duration;

use super::defaults::MAX_CONCURRENCY;
use super::types::PositiveUsize;
use crate::error::{AppError, AppResult, ValidationError};

/// Digits of a fractional second kept (nanosecond resolution).
const NANOS_DIGITS: usize = 9;

/// Parses a duration such as `10s`, `250ms`, `2m` or `1h`. Bare numbers are
/// seconds, and seconds may carry a decimal fraction (`1.5`, `0.25s`).
///
/// # Errors
///
/// Returns an error for empty, malformed, overflowing or zero durations.
pub fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    parse_nonzero_duration(s).map_err(AppError::from)
}

/// Like [`parse_duration_arg`], but `0` is accepted and means "no limit".
///
/// # Errors
///
/// Returns an error for empty, malformed or overflowing durations.
pub fn parse_optional_duration_arg(s: &str) -> AppResult<Duration> {
    parse_duration_value(s).map_err(AppError::from)
}

pub(crate) fn parse_nonzero_duration(s: &str) -> Result<Duration, ValidationError> {
    let duration = parse_duration_value(s)?;
    if duration.is_zero() {
        return Err(ValidationError::DurationZero);
    }
    Ok(duration)
}

pub(crate) fn parse_duration_value(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    let digits_len = value.chars().take_while(char::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;
    if let Some(fraction) = unit_part.strip_prefix('.') {
        return parse_fractional_seconds(value, number, fraction);
    }

    let unit = if unit_part.is_empty() { "s" } else { unit_part };
    let duration = match unit {
        "ms" => Duration::from_millis(number),
        "s" => Duration::from_secs(number),
        "m" => {
            let secs = number
                .checked_mul(60)
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        "h" => {
            let secs = number
                .checked_mul(60)
                .and_then(|minutes| minutes.checked_mul(60))
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        _ => {
            return Err(ValidationError::InvalidDurationUnit {
                unit: unit.to_owned(),
            });
        }
    };

    Ok(duration)
}

/// `<secs>.<fraction>[s]` at nanosecond resolution; digits past the ninth are dropped.
fn parse_fractional_seconds(
    value: &str,
    secs: u64,
    rest: &str,
) -> Result<Duration, ValidationError> {
    let fraction_len = rest.chars().take_while(char::is_ascii_digit).count();
    let (fraction, unit) = rest.split_at(fraction_len);
    if fraction.is_empty() || !matches!(unit, "" | "s") {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }

    let nanos = fraction
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(NANOS_DIGITS)
        .try_fold(0_u32, |acc, digit| {
            acc.checked_mul(10)?
                .checked_add(u32::from(digit.checked_sub(b'0')?))
        })
        .ok_or(ValidationError::DurationOverflow)?;
    Ok(Duration::new(secs, nanos))
}

pub(crate) fn parse_concurrency(s: &str) -> AppResult<PositiveUsize> {
    let value = s.parse::<PositiveUsize>()?;
    ensure_concurrency_bound(value)
}

pub(crate) fn ensure_concurrency_bound(value: PositiveUsize) -> AppResult<PositiveUsize> {
    if value.get() > MAX_CONCURRENCY {
        return Err(AppError::validation(ValidationError::ValueTooLarge {
            max: u64::try_from(MAX_CONCURRENCY).unwrap_or(u64::MAX),
        }));
    }
    Ok(value)
}
