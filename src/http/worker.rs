use std::time::Duration;

use tokio::time::Instant;

use crate::metrics::{RequestError, RequestOutcome, WorkerResult};

use super::transport::{Transport, TransportError};

/// Performs one timed GET and turns it into exactly one worker result.
///
/// The clock starts right before the request is issued and stops after the
/// body has been drained. Anything that prevents a status code, including
/// exceeding `timeout`, becomes a [`RequestError`].
pub async fn perform_request(transport: &dyn Transport, timeout: Duration) -> WorkerResult {
    let start = Instant::now();
    match tokio::time::timeout(timeout, transport.get()).await {
        Ok(Ok(status)) => WorkerResult::Outcome(RequestOutcome::new(status, start.elapsed())),
        Ok(Err(TransportError::TimedOut)) | Err(_) => {
            WorkerResult::Error(RequestError::new(timeout_message(timeout)))
        }
        Ok(Err(TransportError::Failed(message))) => WorkerResult::Error(RequestError::new(message)),
    }
}

fn timeout_message(timeout: Duration) -> String {
    format!("request timed out after {:?}", timeout)
}
