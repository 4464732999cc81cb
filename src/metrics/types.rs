use std::time::Duration;

use serde::Serialize;

/// The only status code counted as a successful request.
pub const SUCCESS_STATUS: u16 = 200;

/// A completed HTTP exchange that produced a status code.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RequestOutcome {
    pub status_code: u16,
    pub latency_ms: f64,
    pub success: bool,
}

impl RequestOutcome {
    #[must_use]
    pub fn new(status_code: u16, latency: Duration) -> Self {
        Self {
            status_code,
            latency_ms: duration_to_ms(latency),
            success: status_code == SUCCESS_STATUS,
        }
    }
}

/// A request that failed before producing a status code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RequestError {
    pub message: String,
}

impl RequestError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// What a single worker hands to the sink: exactly one of the two.
#[derive(Clone, Debug, PartialEq)]
pub enum WorkerResult {
    Outcome(RequestOutcome),
    Error(RequestError),
}

#[expect(
    clippy::float_arithmetic,
    reason = "Latency is reported as fractional milliseconds"
)]
fn duration_to_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
