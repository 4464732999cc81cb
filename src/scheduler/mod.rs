//! Bounded-concurrency admission loop.
//!
//! The scheduler admits one request at a time against a counting budget of
//! `concurrency` slots. Before each admission it checks the stop conditions:
//! the request count, the optional duration cutoff, and an interrupt. Once
//! admission ends it waits for every admitted request, which is the point at
//! which the [`ResultSink`] is quiescent and safe to snapshot.
//!
//! The duration cutoff only stops future admissions; requests already in
//! flight run to their own timeout. An interrupt also stops admissions, then
//! grants in-flight requests a grace period before abandoning them. Abandoned
//! requests never reach the sink.
mod config;
mod dispatch;


use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::args::DEFAULT_INTERRUPT_GRACE;
use crate::http::Transport;
use crate::metrics::ResultSink;
use crate::shutdown::{ShutdownReceiver, ShutdownSender};

pub use config::TestConfig;
use dispatch::{Dispatcher, WorkerContext};

/// What happened during [`Scheduler::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Wall time from run start until quiescence.
    pub elapsed: Duration,
    /// Requests that were given a slot.
    pub admitted: u64,
    /// In-flight requests dropped after the interrupt grace period.
    pub abandoned: u64,
    pub interrupted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopReason {
    Exhausted,
    Deadline,
    Interrupted,
    DispatchClosed,
}

pub struct Scheduler {
    config: TestConfig,
    transport: Arc<dyn Transport>,
    sink: Arc<ResultSink>,
    interrupt_grace: Duration,
}

impl Scheduler {
    #[must_use]
    pub const fn new(
        config: TestConfig,
        transport: Arc<dyn Transport>,
        sink: Arc<ResultSink>,
    ) -> Self {
        Self {
            config,
            transport,
            sink,
            interrupt_grace: DEFAULT_INTERRUPT_GRACE,
        }
    }

    /// How long in-flight requests may keep running after an interrupt.
    #[must_use]
    pub fn with_interrupt_grace(mut self, grace: Duration) -> Self {
        self.interrupt_grace = grace;
        self
    }

    #[must_use]
    pub const fn interrupt_grace(&self) -> Duration {
        self.interrupt_grace
    }

    #[must_use]
    pub const fn config(&self) -> &TestConfig {
        &self.config
    }

    /// Runs the admission loop to completion and waits for quiescence.
    pub async fn run(&self, shutdown_tx: &ShutdownSender) -> RunStats {
        let mut shutdown_rx = shutdown_tx.subscribe();
        let concurrency = self.config.concurrency.get();
        let deadline = self.config.deadline();
        let slots = Arc::new(Semaphore::new(concurrency));
        let mut dispatcher = Dispatcher::new(
            self.config.strategy,
            pool_size(concurrency, self.config.total_requests),
            WorkerContext {
                transport: Arc::clone(&self.transport),
                sink: Arc::clone(&self.sink),
                timeout: self.config.timeout,
            },
        );

        let start = Instant::now();
        let mut admitted: u64 = 0;
        let stop = loop {
            if admitted >= self.config.total_requests {
                break StopReason::Exhausted;
            }
            let permit = tokio::select! {
                biased;
                _ = shutdown_rx.recv() => break StopReason::Interrupted,
                permit = Arc::clone(&slots).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_closed) => break StopReason::DispatchClosed,
                },
            };
            if let Some(limit) = deadline
                && start.elapsed() >= limit
            {
                drop(permit);
                break StopReason::Deadline;
            }
            if !dispatcher.dispatch(permit).await {
                break StopReason::DispatchClosed;
            }
            admitted = admitted.saturating_add(1);
        };
        dispatcher.close();

        match stop {
            StopReason::Exhausted => debug!("Admitted all {} requests", admitted),
            StopReason::Deadline => info!(
                "Run duration {:?} reached, stopped admitting new requests ({} admitted)",
                self.config.max_duration, admitted
            ),
            StopReason::Interrupted => {
                warn!("Interrupted, stopped admitting new requests ({} admitted)", admitted);
            }
            StopReason::DispatchClosed => {
                warn!("Workers stopped accepting requests ({} admitted)", admitted);
            }
        }

        let interrupted = self
            .settle(
                &mut dispatcher,
                &mut shutdown_rx,
                stop == StopReason::Interrupted,
            )
            .await;
        let completed = u64::try_from(self.sink.completed()).unwrap_or(u64::MAX);
        let abandoned = admitted.saturating_sub(completed);
        if abandoned > 0 {
            warn!("Abandoned {} in-flight requests", abandoned);
        }

        RunStats {
            elapsed: start.elapsed(),
            admitted,
            abandoned,
            interrupted,
        }
    }

    /// Waits for admitted requests. An interrupt, before or during the wait,
    /// limits the remaining wait to the grace period. Returns whether the run
    /// was interrupted.
    async fn settle(
        &self,
        dispatcher: &mut Dispatcher,
        shutdown_rx: &mut ShutdownReceiver,
        already_interrupted: bool,
    ) -> bool {
        if !already_interrupted {
            tokio::select! {
                () = dispatcher.join_all() => return false,
                _ = shutdown_rx.recv() => {
                    warn!("Interrupted while waiting for in-flight requests");
                }
            }
        }

        if tokio::time::timeout(self.interrupt_grace, dispatcher.join_all())
            .await
            .is_err()
        {
            dispatcher.abort_all().await;
        }
        true
    }
}

/// Pool workers beyond the request count would never receive a job.
fn pool_size(concurrency: usize, total_requests: u64) -> usize {
    usize::try_from(total_requests)
        .map_or(concurrency, |total| total.min(concurrency))
        .max(1)
}
