use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::instrument::WithSubscriber;

use crate::error::TransportError;
use crate::http::send_call;
use crate::request::RequestDescriptor;

use super::scoped::{Scheduler, join_all_fail_fast, log_call, run_scoped};
use super::{Strategy, StrategyKind};

/// One spawned task per call, no ceiling on how many run at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl Strategy for Unbounded {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Unbounded
    }

    fn execute(
        &self,
        request: &RequestDescriptor,
        calls: usize,
    ) -> Result<Duration, TransportError> {
        run_scoped(
            StrategyKind::Unbounded,
            Scheduler::Unbounded,
            request,
            |runtime, client| {
                let request = Arc::new(request.clone());
                runtime.block_on(async move {
                    let mut tasks = JoinSet::new();
                    for _ in 0..calls {
                        let client = client.clone();
                        let request = Arc::clone(&request);
                        tasks.spawn(
                            async move {
                                let summary = send_call(&client, &request).await?;
                                log_call(StrategyKind::Unbounded, &summary);
                                Ok::<(), TransportError>(())
                            }
                            .with_current_subscriber(),
                        );
                    }
                    join_all_fail_fast(tasks).await
                })
            },
        )
    }
}
