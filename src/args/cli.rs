use clap::Parser;
use std::time::Duration;

use super::defaults::{DEFAULT_INTERRUPT_GRACE_ARG, default_concurrency};
use super::parsers::{parse_concurrency, parse_duration_arg, parse_optional_duration_arg};
use super::types::{OutputFormat, PositiveUsize, Strategy};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Bounded-concurrency HTTP GET load generator with latency, status and error statistics.",
    next_help_heading = "Advanced Options"
)]
pub struct TesterArgs {
    /// Target URL for the load test
    #[arg(long, short, env = "BARRAGE_URL", help_heading = "Common Options")]
    pub url: Option<String>,

    /// Total number of GET requests to issue (0 issues none)
    #[arg(
        long = "requests",
        short = 'n',
        default_value = "100",
        env = "BARRAGE_REQUESTS",
        help_heading = "Common Options"
    )]
    pub requests: u64,

    /// Maximum number of requests in flight (defaults to 4x available cores, capped at 120)
    #[arg(
        long,
        short = 'c',
        default_value_t = default_concurrency(),
        value_parser = parse_concurrency,
        env = "BARRAGE_CONCURRENCY",
        help_heading = "Common Options"
    )]
    pub concurrency: PositiveUsize,

    /// Per-request timeout covering connect, response and body (e.g. 10s, 1.5, 500ms)
    #[arg(
        long = "timeout",
        default_value = "10s",
        value_parser = parse_duration_arg,
        env = "BARRAGE_TIMEOUT",
        help_heading = "Common Options"
    )]
    pub request_timeout: Duration,

    /// Stop admitting new requests after this long (e.g. 30s, 1.5, 2m; 0 = no limit)
    #[arg(
        long = "duration",
        short = 'd',
        default_value = "0",
        value_parser = parse_optional_duration_arg,
        env = "BARRAGE_DURATION",
        help_heading = "Common Options"
    )]
    pub max_duration: Duration,

    /// Execution strategy for admitted requests
    #[arg(long, default_value = "async", value_enum, env = "BARRAGE_STRATEGY")]
    pub strategy: Strategy,

    /// Log a progress line every N completed requests (0 disables)
    #[arg(long = "progress-every", default_value = "100")]
    pub progress_every: u64,

    /// How long to wait for in-flight requests after an interrupt before abandoning them
    #[arg(
        long = "interrupt-grace",
        default_value = DEFAULT_INTERRUPT_GRACE_ARG,
        value_parser = parse_optional_duration_arg
    )]
    pub interrupt_grace: Duration,

    /// Report format printed after the run
    #[arg(long = "output-format", default_value = "text", value_enum)]
    pub output_format: OutputFormat,

    /// Also write the rendered report to this file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by BARRAGE_LOG/RUST_LOG)
    #[arg(long, short = 'v', help_heading = "Common Options")]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Path to config file (TOML/JSON). Defaults to ./barrage.toml or ./barrage.json if present.
    #[arg(long, help_heading = "Common Options")]
    pub config: Option<String>,
}
