use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::instrument::WithSubscriber;

use crate::error::TransportError;
use crate::http::send_call;
use crate::request::RequestDescriptor;

use super::scoped::{Scheduler, join_all_fail_fast, log_call, run_scoped};
use super::{DEFAULT_POOL_SIZE, Strategy, StrategyKind};

/// A fixed pool of workers sharing the batch. At most `pool_size` calls are
/// in flight; the rest wait for a worker to free up.
#[derive(Debug, Clone, Copy)]
pub struct BoundedPool {
    pool_size: usize,
}

impl BoundedPool {
    /// A pool size of zero is treated as one.
    #[must_use]
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool_size: pool_size.max(1),
        }
    }

    #[must_use]
    pub const fn pool_size(&self) -> usize {
        self.pool_size
    }
}

impl Default for BoundedPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_SIZE)
    }
}

/// Remaining calls of a batch, claimed one at a time by pool workers.
#[derive(Debug)]
struct CallQuota {
    remaining: AtomicUsize,
}

impl CallQuota {
    const fn new(calls: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(calls),
        }
    }

    fn try_claim(&self) -> bool {
        loop {
            let current = self.remaining.load(Ordering::Relaxed);
            let Some(next) = current.checked_sub(1) else {
                return false;
            };
            if self
                .remaining
                .compare_exchange(current, next, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                return true;
            }
        }
    }
}

impl Strategy for BoundedPool {
    fn kind(&self) -> StrategyKind {
        StrategyKind::BoundedPool
    }

    fn execute(
        &self,
        request: &RequestDescriptor,
        calls: usize,
    ) -> Result<Duration, TransportError> {
        let pool_size = self.pool_size;
        run_scoped(
            StrategyKind::BoundedPool,
            Scheduler::Workers(pool_size),
            request,
            |runtime, client| {
                let request = Arc::new(request.clone());
                let quota = Arc::new(CallQuota::new(calls));
                runtime.block_on(async move {
                    let mut workers = JoinSet::new();
                    for _ in 0..pool_size.min(calls) {
                        let client = client.clone();
                        let request = Arc::clone(&request);
                        let quota = Arc::clone(&quota);
                        workers.spawn(
                            async move {
                                while quota.try_claim() {
                                    let summary = send_call(&client, &request).await?;
                                    log_call(StrategyKind::BoundedPool, &summary);
                                }
                                Ok::<(), TransportError>(())
                            }
                            .with_current_subscriber(),
                        );
                    }
                    join_all_fail_fast(workers).await
                })
            },
        )
    }
}
