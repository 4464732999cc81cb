use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;
use tracing::warn;

use super::histogram::LatencyHistogram;
use super::sink::SinkSnapshot;
use super::types::RequestOutcome;
use crate::error::MetricsError;

const QUANTILE_P90: f64 = 0.90;
const QUANTILE_P99: f64 = 0.99;
const PERCENT: f64 = 100.0;
const MICROS_PER_MS: f64 = 1000.0;

/// Aggregate statistics for one finished run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryReport {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    /// Requests that produced a status code, whatever it was.
    pub responses: u64,
    /// Requests that failed before producing a status code.
    pub transport_errors: u64,
    /// `None` when no request completed.
    pub success_rate: Option<f64>,
    pub elapsed_secs: f64,
    /// `None` when no request completed or no time elapsed.
    pub throughput_rps: Option<f64>,
    /// `None` when no request produced a status code.
    pub latency: Option<LatencyStats>,
    /// Status codes in order of first occurrence.
    pub status_codes: Vec<StatusCount>,
    /// Distinct error messages in order of first occurrence.
    pub errors: Vec<ErrorCount>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LatencyStats {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub p90_ms: Option<f64>,
    pub p99_ms: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status_code: u16,
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorCount {
    pub message: String,
    pub count: u64,
}

impl SummaryReport {
    /// True when no request completed at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_requests == 0
    }
}

/// Builds the summary for a quiescent sink snapshot and the run's wall time.
#[must_use]
pub fn summarize(snapshot: &SinkSnapshot, elapsed: Duration) -> SummaryReport {
    let responses = to_u64(snapshot.outcomes.len());
    let transport_errors = to_u64(snapshot.errors.len());
    let total_requests = responses.saturating_add(transport_errors);
    let successful_requests = to_u64(
        snapshot
            .outcomes
            .iter()
            .filter(|outcome| outcome.success)
            .count(),
    );
    let elapsed_secs = elapsed.as_secs_f64();

    SummaryReport {
        total_requests,
        successful_requests,
        failed_requests: total_requests.saturating_sub(successful_requests),
        responses,
        transport_errors,
        success_rate: success_rate(successful_requests, total_requests),
        elapsed_secs,
        throughput_rps: throughput(total_requests, elapsed_secs),
        latency: latency_stats(&snapshot.outcomes),
        status_codes: status_histogram(&snapshot.outcomes),
        errors: error_histogram(snapshot),
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "Rates are reported as floating point percentages"
)]
fn success_rate(successful: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(successful as f64 / total as f64 * PERCENT)
}

#[expect(
    clippy::float_arithmetic,
    reason = "Throughput is reported as fractional requests per second"
)]
fn throughput(total: u64, elapsed_secs: f64) -> Option<f64> {
    if total == 0 || elapsed_secs <= 0.0 {
        return None;
    }
    Some(total as f64 / elapsed_secs)
}

#[expect(
    clippy::float_arithmetic,
    reason = "Latency statistics are computed over fractional milliseconds"
)]
fn latency_stats(outcomes: &[RequestOutcome]) -> Option<LatencyStats> {
    let mut latencies: Vec<f64> = outcomes.iter().map(|outcome| outcome.latency_ms).collect();
    latencies.sort_unstable_by(f64::total_cmp);

    let min_ms = *latencies.first()?;
    let max_ms = *latencies.last()?;
    let mean_ms = latencies.iter().sum::<f64>() / latencies.len() as f64;
    let median_ms = median(&latencies)?;

    let (p90_ms, p99_ms) = match tail_percentiles(&latencies) {
        Ok(tail) => tail,
        Err(err) => {
            warn!("Skipping tail percentiles: {}", err);
            (None, None)
        }
    };

    Some(LatencyStats {
        mean_ms,
        median_ms,
        min_ms,
        max_ms,
        p90_ms,
        p99_ms,
    })
}

/// Median of an ascending slice; the mean of the two middle values for even lengths.
#[expect(
    clippy::float_arithmetic,
    reason = "Even-length median averages the two middle samples"
)]
fn median(sorted: &[f64]) -> Option<f64> {
    let mid = sorted.len().checked_div(2)?;
    let upper = *sorted.get(mid)?;
    if sorted.len().checked_rem(2) == Some(1) {
        return Some(upper);
    }
    let lower = *sorted.get(mid.checked_sub(1)?)?;
    Some((lower + upper) / 2.0)
}

#[expect(
    clippy::float_arithmetic,
    reason = "Histogram works in whole microseconds"
)]
fn tail_percentiles(latencies: &[f64]) -> Result<(Option<f64>, Option<f64>), MetricsError> {
    let mut histogram = LatencyHistogram::new()?;
    for latency_ms in latencies {
        histogram.record((latency_ms * MICROS_PER_MS).round() as u64)?;
    }
    let to_ms = |value_us: u64| value_us as f64 / MICROS_PER_MS;
    Ok((
        histogram.value_at_quantile(QUANTILE_P90).map(to_ms),
        histogram.value_at_quantile(QUANTILE_P99).map(to_ms),
    ))
}

fn status_histogram(outcomes: &[RequestOutcome]) -> Vec<StatusCount> {
    let mut counts: Vec<StatusCount> = Vec::new();
    for outcome in outcomes {
        match counts
            .iter_mut()
            .find(|entry| entry.status_code == outcome.status_code)
        {
            Some(entry) => entry.count = entry.count.saturating_add(1),
            None => counts.push(StatusCount {
                status_code: outcome.status_code,
                count: 1,
            }),
        }
    }
    counts
}

fn error_histogram(snapshot: &SinkSnapshot) -> Vec<ErrorCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<ErrorCount> = Vec::new();
    for error in &snapshot.errors {
        let message = error.message.as_str();
        if let Some(entry) = index.get(message).and_then(|&slot| counts.get_mut(slot)) {
            entry.count = entry.count.saturating_add(1);
            continue;
        }
        index.insert(message, counts.len());
        counts.push(ErrorCount {
            message: message.to_owned(),
            count: 1,
        });
    }
    counts
}

fn to_u64(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}
