use std::time::{Duration, Instant};

use reqwest::Client;
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::error::TransportError;
use crate::http::{ResponseSummary, build_client};
use crate::request::RequestDescriptor;

use super::StrategyKind;

/// Thread layout of the runtime a strategy runs on.
#[derive(Debug, Clone, Copy)]
pub(super) enum Scheduler {
    /// Everything on the calling thread.
    CurrentThread,
    /// Exactly this many worker threads.
    Workers(usize),
    /// Default multi-thread scheduler; tasks are spawned without a cap.
    Unbounded,
}

impl Scheduler {
    fn build(self) -> Result<Runtime, TransportError> {
        let mut builder = match self {
            Scheduler::CurrentThread => Builder::new_current_thread(),
            Scheduler::Workers(count) => {
                let mut builder = Builder::new_multi_thread();
                builder
                    .worker_threads(count.max(1))
                    .thread_name("callbench-pool");
                builder
            }
            Scheduler::Unbounded => {
                let mut builder = Builder::new_multi_thread();
                builder.thread_name("callbench-task");
                builder
            }
        };
        builder
            .enable_all()
            .build()
            .map_err(|err| TransportError::Runtime { source: err })
    }
}

/// Runs `body` with a runtime and client scoped to one strategy invocation.
///
/// The clock starts before either resource exists and stops after the
/// runtime has shut down, on success and on failure alike.
pub(super) fn run_scoped<F>(
    kind: StrategyKind,
    scheduler: Scheduler,
    request: &RequestDescriptor,
    body: F,
) -> Result<Duration, TransportError>
where
    F: FnOnce(&Runtime, Client) -> Result<(), TransportError>,
{
    let started = Instant::now();
    let outcome = scheduler.build().and_then(|runtime| {
        let result = build_client(request).and_then(|client| body(&runtime, client));
        drop(runtime);
        result
    });
    let elapsed = started.elapsed();
    match &outcome {
        Ok(()) => debug!("{} finished in {}ms", kind.label(), elapsed.as_millis()),
        Err(err) => debug!("{} aborted after {}ms: {}", kind.label(), elapsed.as_millis(), err),
    }
    outcome.map(|()| elapsed)
}

/// Spawned tasks carry the caller's subscriber, so these lines land wherever
/// the invoking thread logs.
pub(super) fn log_call(kind: StrategyKind, summary: &ResponseSummary) {
    debug!("{} call status {}", kind.label(), summary.status);
    info!("{} call: {}", kind.label(), summary.body_bytes);
}

/// Waits for every task in `tasks`, stopping at the first failure. Returning
/// early drops the set, which aborts whatever is still running.
pub(super) async fn join_all_fail_fast(
    mut tasks: JoinSet<Result<(), TransportError>>,
) -> Result<(), TransportError> {
    while let Some(joined) = tasks.join_next().await {
        joined.map_err(|err| TransportError::TaskFailed { source: err })??;
    }
    Ok(())
}
