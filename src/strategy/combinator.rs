use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{FutureExt, TryFutureExt, try_join_all};
use tracing::info;
use tracing::instrument::WithSubscriber;

use crate::error::TransportError;
use crate::http::send_call;
use crate::request::RequestDescriptor;

use super::scoped::{Scheduler, log_call, run_scoped};
use super::{Strategy, StrategyKind};

/// All calls combined into one future that resolves once every call has
/// completed and fails as soon as any of them fails. Dispatch is concurrent,
/// but polling and bookkeeping stay on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct Combinator;

impl Strategy for Combinator {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Combinator
    }

    fn execute(
        &self,
        request: &RequestDescriptor,
        calls: usize,
    ) -> Result<Duration, TransportError> {
        run_scoped(
            StrategyKind::Combinator,
            Scheduler::CurrentThread,
            request,
            |runtime, client| {
                runtime.block_on(async {
                    let pending = (0..calls).map(|_| {
                        send_call(&client, request)
                            .inspect_ok(|summary| log_call(StrategyKind::Combinator, summary))
                    });
                    let responses = try_join_all(pending).await?;
                    info!(
                        "{} combined responses: {}",
                        StrategyKind::Combinator.label(),
                        responses.len()
                    );
                    Ok::<(), TransportError>(())
                })
            },
        )
    }
}

/// Same combination as [`Combinator`], but every call and the combination
/// itself run as spawned tasks on the multi-thread scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombinatorUnbounded;

impl Strategy for CombinatorUnbounded {
    fn kind(&self) -> StrategyKind {
        StrategyKind::CombinatorUnbounded
    }

    fn execute(
        &self,
        request: &RequestDescriptor,
        calls: usize,
    ) -> Result<Duration, TransportError> {
        run_scoped(
            StrategyKind::CombinatorUnbounded,
            Scheduler::Unbounded,
            request,
            |runtime, client| {
                let request = Arc::new(request.clone());
                let combining = async move {
                    let handles: Vec<_> = (0..calls)
                        .map(|_| {
                            let client = client.clone();
                            let request = Arc::clone(&request);
                            tokio::spawn(
                                async move {
                                    send_call(&client, &request).await.inspect(|summary| {
                                        log_call(StrategyKind::CombinatorUnbounded, summary);
                                    })
                                }
                                .with_current_subscriber(),
                            )
                        })
                        .collect();
                    let pending = handles.into_iter().map(|handle| {
                        handle.map(|joined| {
                            joined
                                .map_err(|err| TransportError::TaskFailed { source: err })
                                .and_then(|result| result)
                        })
                    });
                    let responses = try_join_all(pending).await?;
                    info!(
                        "{} combined responses: {}",
                        StrategyKind::CombinatorUnbounded.label(),
                        responses.len()
                    );
                    Ok::<(), TransportError>(())
                };
                let combined = runtime.spawn(combining.with_current_subscriber());
                runtime
                    .block_on(combined)
                    .map_err(|err| TransportError::TaskFailed { source: err })?
            },
        )
    }
}
