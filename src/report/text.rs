use crate::metrics::{LatencyStats, SummaryReport};

use super::RunReport;

const NOT_AVAILABLE: &str = "n/a";

/// Human readable report, one line per entry.
#[must_use]
pub fn render_text(report: &RunReport) -> Vec<String> {
    let summary = &report.summary;
    let mut lines = vec![
        "Summary".to_owned(),
        format!("Started: {}", report.started_at),
        format!("Target: {}", report.url),
        format!(
            "Strategy: {} (concurrency {})",
            report.strategy.as_str(),
            report.concurrency
        ),
        format!(
            "Requests: {} requested, {} admitted, {} abandoned",
            report.requested, report.admitted, report.abandoned
        ),
    ];
    if report.interrupted {
        lines.push("Interrupted: yes (partial results)".to_owned());
    }
    lines.push(format!("Duration: {:.3}s", summary.elapsed_secs));

    if summary.is_empty() {
        lines.push("No requests completed.".to_owned());
        return lines;
    }

    lines.extend(count_lines(summary));
    match summary.latency.as_ref() {
        Some(latency) => lines.extend(latency_lines(latency)),
        None => lines.push("Latency: n/a (no responses)".to_owned()),
    }

    lines.push("Status Codes:".to_owned());
    if summary.status_codes.is_empty() {
        lines.push("  (none)".to_owned());
    }
    for entry in &summary.status_codes {
        lines.push(format!("  {}: {}", entry.status_code, entry.count));
    }

    lines.push("Errors:".to_owned());
    if summary.errors.is_empty() {
        lines.push("  (none)".to_owned());
    }
    for entry in &summary.errors {
        lines.push(format!("  {} x{}", entry.message, entry.count));
    }
    lines
}

fn count_lines(summary: &SummaryReport) -> [String; 6] {
    [
        format!("Total Requests: {}", summary.total_requests),
        format!("Successful: {}", summary.successful_requests),
        format!("Failed: {}", summary.failed_requests),
        format!(
            "Responses / Transport Errors: {} / {}",
            summary.responses, summary.transport_errors
        ),
        format!(
            "Success Rate: {}",
            optional(summary.success_rate, |rate| format!("{:.2}%", rate))
        ),
        format!(
            "Throughput: {}",
            optional(summary.throughput_rps, |rps| format!("{:.2} req/s", rps))
        ),
    ]
}

fn latency_lines(latency: &LatencyStats) -> [String; 4] {
    [
        format!("Avg Latency: {:.2}ms", latency.mean_ms),
        format!("Median Latency: {:.2}ms", latency.median_ms),
        format!(
            "Min/Max Latency: {:.2}ms / {:.2}ms",
            latency.min_ms, latency.max_ms
        ),
        format!(
            "P90/P99 Latency: {} / {}",
            optional(latency.p90_ms, |value| format!("{:.2}ms", value)),
            optional(latency.p99_ms, |value| format!("{:.2}ms", value))
        ),
    ]
}

fn optional(value: Option<f64>, format: impl Fn(f64) -> String) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_owned(), format)
}
