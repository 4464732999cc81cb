//! Per-request outcomes, the shared result sink, and summary statistics.
mod histogram;
mod sink;
mod summary;
mod types;


pub use histogram::LatencyHistogram;
pub use sink::{ResultSink, SinkSnapshot};
pub use summary::{ErrorCount, LatencyStats, StatusCount, SummaryReport, summarize};
pub use types::{RequestError, RequestOutcome, SUCCESS_STATUS, WorkerResult};
