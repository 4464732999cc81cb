use super::test_support::parse_test_args;
use super::*;
use crate::error::{AppError, AppResult};
use std::time::Duration;

#[test]
fn parse_args_defaults() -> AppResult<()> {
    let args = parse_test_args(["barrage", "-u", "http://localhost"])?;

    let checks = [
        (
            args.url.as_deref() == Some("http://localhost"),
            "Unexpected url",
        ),
        (args.requests == 100, "Unexpected requests"),
        (
            args.concurrency == default_concurrency(),
            "Unexpected concurrency",
        ),
        (
            args.request_timeout == Duration::from_secs(10),
            "Unexpected request_timeout",
        ),
        (args.max_duration.is_zero(), "Expected unbounded duration"),
        (
            matches!(args.strategy, Strategy::Async),
            "Expected Strategy::Async",
        ),
        (args.progress_every == 100, "Unexpected progress_every"),
        (
            args.interrupt_grace == DEFAULT_INTERRUPT_GRACE,
            "Unexpected interrupt_grace",
        ),
        (
            matches!(args.output_format, OutputFormat::Text),
            "Expected OutputFormat::Text",
        ),
        (args.output.is_none(), "Expected output to be None"),
        (args.config.is_none(), "Expected config to be None"),
        (!args.verbose, "Expected verbose to be false"),
    ];

    for (ok, message) in checks {
        if !ok {
            return Err(AppError::validation(message));
        }
    }
    Ok(())
}

#[test]
fn parse_args_custom_values() -> AppResult<()> {
    let args = parse_test_args([
        "barrage",
        "--url",
        "https://example.com/health",
        "-n",
        "5000",
        "-c",
        "32",
        "--timeout",
        "750ms",
        "-d",
        "2m",
        "--strategy",
        "pool",
        "--progress-every",
        "0",
        "--output-format",
        "json",
        "-o",
        "report.json",
    ])?;

    if args.requests != 5000 {
        return Err(AppError::validation("Unexpected requests"));
    }
    if args.concurrency.get() != 32 {
        return Err(AppError::validation("Unexpected concurrency"));
    }
    if args.request_timeout != Duration::from_millis(750) {
        return Err(AppError::validation("Unexpected timeout"));
    }
    if args.max_duration != Duration::from_secs(120) {
        return Err(AppError::validation("Unexpected duration"));
    }
    if args.strategy != Strategy::Pool {
        return Err(AppError::validation("Expected Strategy::Pool"));
    }
    if args.progress_every != 0 {
        return Err(AppError::validation("Unexpected progress_every"));
    }
    if args.output_format != OutputFormat::Json {
        return Err(AppError::validation("Expected OutputFormat::Json"));
    }
    if args.output.as_deref() != Some("report.json") {
        return Err(AppError::validation("Unexpected output"));
    }
    Ok(())
}

#[test]
fn zero_concurrency_is_rejected() -> AppResult<()> {
    match parse_test_args(["barrage", "-u", "http://localhost", "-c", "0"]) {
        Ok(_) => Err(AppError::validation("Expected concurrency 0 to fail")),
        Err(_) => Ok(()),
    }
}

#[test]
fn excessive_concurrency_is_rejected() -> AppResult<()> {
    let too_many = MAX_CONCURRENCY.saturating_add(1).to_string();
    match parse_test_args(["barrage", "-u", "http://localhost", "-c", too_many.as_str()]) {
        Ok(_) => Err(AppError::validation("Expected oversized concurrency to fail")),
        Err(_) => Ok(()),
    }
}

#[test]
fn zero_timeout_is_rejected() -> AppResult<()> {
    match parse_test_args(["barrage", "-u", "http://localhost", "--timeout", "0"]) {
        Ok(_) => Err(AppError::validation("Expected zero timeout to fail")),
        Err(_) => Ok(()),
    }
}

#[test]
fn duration_parser_accepts_units() -> AppResult<()> {
    let cases = [
        ("15", Duration::from_secs(15)),
        ("250ms", Duration::from_millis(250)),
        ("3s", Duration::from_secs(3)),
        ("2m", Duration::from_secs(120)),
        ("1h", Duration::from_secs(3600)),
    ];
    for (input, expected) in cases {
        let parsed = parse_duration_arg(input)?;
        if parsed != expected {
            return Err(AppError::validation(format!(
                "Unexpected duration for '{}': {:?}",
                input, parsed
            )));
        }
    }
    Ok(())
}

#[test]
fn duration_parser_rejects_garbage() -> AppResult<()> {
    for input in ["", "s10", "10d", "-5s"] {
        if parse_optional_duration_arg(input).is_ok() {
            return Err(AppError::validation(format!(
                "Expected '{}' to be rejected",
                input
            )));
        }
    }
    Ok(())
}

#[test]
fn optional_duration_accepts_zero() -> AppResult<()> {
    let parsed = parse_optional_duration_arg("0")?;
    if !parsed.is_zero() {
        return Err(AppError::validation("Expected zero duration"));
    }
    if parse_duration_arg("0").is_ok() {
        return Err(AppError::validation("Expected zero to be rejected"));
    }
    Ok(())
}

#[test]
fn interrupt_grace_default_text_matches_constant() -> AppResult<()> {
    let parsed = parse_optional_duration_arg(super::defaults::DEFAULT_INTERRUPT_GRACE_ARG)?;
    if parsed != DEFAULT_INTERRUPT_GRACE {
        return Err(AppError::validation(
            "CLI default interrupt grace differs from DEFAULT_INTERRUPT_GRACE",
        ));
    }
    Ok(())
}

#[test]
fn duration_parser_accepts_fractional_seconds() -> AppResult<()> {
    let cases = [
        ("1.5", Duration::from_millis(1500)),
        ("0.25s", Duration::from_millis(250)),
        ("2.1234567891", Duration::new(2, 123_456_789)),
        ("10.0", Duration::from_secs(10)),
    ];
    for (input, expected) in cases {
        let parsed = parse_duration_arg(input)?;
        if parsed != expected {
            return Err(AppError::validation(format!(
                "Unexpected duration for '{}': {:?}",
                input, parsed
            )));
        }
    }

    for input in ["1.", "1.5ms", "1.5m", ".5", "1.2.3"] {
        if parse_optional_duration_arg(input).is_ok() {
            return Err(AppError::validation(format!(
                "Expected '{}' to be rejected",
                input
            )));
        }
    }
    if parse_duration_arg("0.0").is_ok() {
        return Err(AppError::validation("Expected zero fraction to be rejected"));
    }

    let args = parse_test_args(["barrage", "-u", "http://localhost", "-d", "1.5"])?;
    if args.max_duration != Duration::from_millis(1500) {
        return Err(AppError::validation("Expected --duration 1.5 to mean 1.5s"));
    }
    Ok(())
}
