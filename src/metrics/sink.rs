use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use super::types::{RequestError, RequestOutcome, WorkerResult};

/// Collects worker results from any number of concurrent workers.
///
/// Appends take the lock for a single `Vec::push`; nothing else happens
/// inside the critical section. Read the contents with [`ResultSink::snapshot`]
/// once the scheduler has returned, which is the point where every admitted
/// worker has finished.
#[derive(Debug, Default)]
pub struct ResultSink {
    state: Mutex<SinkState>,
    progress_every: u64,
}

#[derive(Debug, Default)]
struct SinkState {
    outcomes: Vec<RequestOutcome>,
    errors: Vec<RequestError>,
}

/// Frozen copy of the sink contents, in submission order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SinkSnapshot {
    pub outcomes: Vec<RequestOutcome>,
    pub errors: Vec<RequestError>,
}

impl SinkSnapshot {
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len().saturating_add(self.errors.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty() && self.errors.is_empty()
    }
}

impl ResultSink {
    /// Creates an empty sink that logs a progress line every `progress_every`
    /// submissions (`0` disables progress lines).
    #[must_use]
    pub fn new(progress_every: u64) -> Self {
        Self {
            state: Mutex::new(SinkState::default()),
            progress_every,
        }
    }

    pub fn submit(&self, result: WorkerResult) {
        match result {
            WorkerResult::Outcome(outcome) => self.submit_outcome(outcome),
            WorkerResult::Error(error) => self.submit_error(error),
        }
    }

    pub fn submit_outcome(&self, outcome: RequestOutcome) {
        let completed = {
            let mut state = self.lock();
            state.outcomes.push(outcome);
            state.completed()
        };
        if self.should_report(completed) {
            info!(
                "Request {}: {} - {:.2}ms",
                completed, outcome.status_code, outcome.latency_ms
            );
        }
    }

    pub fn submit_error(&self, error: RequestError) {
        warn!("Request failed: {}", error.message);
        let completed = {
            let mut state = self.lock();
            state.errors.push(error);
            state.completed()
        };
        if self.should_report(completed) {
            info!("Request {}: failed", completed);
        }
    }

    /// Number of results submitted so far.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.lock().completed()
    }

    /// Copies the current contents. Before quiescence this is a best-effort
    /// partial view.
    #[must_use]
    pub fn snapshot(&self) -> SinkSnapshot {
        let state = self.lock();
        SinkSnapshot {
            outcomes: state.outcomes.clone(),
            errors: state.errors.clone(),
        }
    }

    // A panicking worker can only poison the lock between two pushes, so the
    // vectors are always whole.
    fn lock(&self) -> MutexGuard<'_, SinkState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn should_report(&self, completed: usize) -> bool {
        let completed = u64::try_from(completed).unwrap_or(u64::MAX);
        self.progress_every > 0 && completed.checked_rem(self.progress_every) == Some(0)
    }
}

impl SinkState {
    fn completed(&self) -> usize {
        self.outcomes.len().saturating_add(self.errors.len())
    }
}
