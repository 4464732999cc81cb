use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedSemaphorePermit, mpsc};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error};

use crate::args::Strategy;
use crate::http::{Transport, perform_request};
use crate::metrics::ResultSink;

/// Everything a worker needs to run one request and record it.
pub(super) struct WorkerContext {
    pub(super) transport: Arc<dyn Transport>,
    pub(super) sink: Arc<ResultSink>,
    pub(super) timeout: Duration,
}

impl WorkerContext {
    async fn run_one(&self) {
        let result = perform_request(self.transport.as_ref(), self.timeout).await;
        self.sink.submit(result);
    }
}

/// Executes admitted requests. The admission slot (`permit`) travels with
/// each request and is released only after its result reached the sink.
pub(super) enum Dispatcher {
    /// A fresh task per admitted request.
    Tasks {
        context: Arc<WorkerContext>,
        tasks: JoinSet<()>,
    },
    /// A fixed set of long-lived workers fed through a channel.
    Pool {
        jobs: Option<mpsc::Sender<OwnedSemaphorePermit>>,
        workers: JoinSet<()>,
    },
}

impl Dispatcher {
    /// `pool_size` only matters for [`Strategy::Pool`] and must be at least one.
    pub(super) fn new(strategy: Strategy, pool_size: usize, context: WorkerContext) -> Self {
        let context = Arc::new(context);
        match strategy {
            Strategy::Async => Dispatcher::Tasks {
                context,
                tasks: JoinSet::new(),
            },
            Strategy::Pool => {
                let (jobs_tx, jobs_rx) = mpsc::channel::<OwnedSemaphorePermit>(pool_size);
                let jobs_rx = Arc::new(Mutex::new(jobs_rx));
                let mut workers = JoinSet::new();
                for worker_id in 0..pool_size {
                    let context = Arc::clone(&context);
                    let jobs_rx = Arc::clone(&jobs_rx);
                    workers.spawn(async move {
                        loop {
                            let job = jobs_rx.lock().await.recv().await;
                            let Some(permit) = job else {
                                break;
                            };
                            context.run_one().await;
                            drop(permit);
                        }
                        debug!("Pool worker {} finished", worker_id);
                    });
                }
                Dispatcher::Pool {
                    jobs: Some(jobs_tx),
                    workers,
                }
            }
        }
    }

    /// Hands one admitted request to the execution strategy. Returns `false`
    /// when the strategy can no longer accept work.
    pub(super) async fn dispatch(&mut self, permit: OwnedSemaphorePermit) -> bool {
        match self {
            Dispatcher::Tasks { context, tasks } => {
                while let Some(result) = tasks.try_join_next() {
                    log_join_result(result);
                }
                let context = Arc::clone(context);
                tasks.spawn(async move {
                    context.run_one().await;
                    drop(permit);
                });
                true
            }
            Dispatcher::Pool { jobs, .. } => match jobs.as_ref() {
                Some(sender) => sender.send(permit).await.is_ok(),
                None => false,
            },
        }
    }

    /// Stops accepting work so pool workers exit once the queue is empty.
    pub(super) fn close(&mut self) {
        if let Dispatcher::Pool { jobs, .. } = self {
            jobs.take();
        }
    }

    /// Waits until every dispatched request has finished. Cancel-safe: progress
    /// made before cancellation is kept.
    pub(super) async fn join_all(&mut self) {
        let set = self.join_set();
        while let Some(result) = set.join_next().await {
            log_join_result(result);
        }
    }

    /// Aborts whatever is still running and waits for the aborts to land.
    pub(super) async fn abort_all(&mut self) {
        self.close();
        let set = self.join_set();
        set.abort_all();
        while let Some(result) = set.join_next().await {
            if let Err(err) = result
                && !err.is_cancelled()
            {
                error!("Request worker failed: {}", err);
            }
        }
    }

    #[cfg(test)]
    pub(super) fn worker_count(&self) -> usize {
        match self {
            Dispatcher::Tasks { tasks, .. } => tasks.len(),
            Dispatcher::Pool { workers, .. } => workers.len(),
        }
    }

    fn join_set(&mut self) -> &mut JoinSet<()> {
        match self {
            Dispatcher::Tasks { tasks, .. } => tasks,
            Dispatcher::Pool { workers, .. } => workers,
        }
    }
}

fn log_join_result(result: Result<(), JoinError>) {
    if let Err(err) = result {
        error!("Request worker failed: {}", err);
    }
}
