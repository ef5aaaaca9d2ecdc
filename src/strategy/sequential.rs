use std::time::Duration;

use crate::error::TransportError;
use crate::http::send_call;
use crate::request::RequestDescriptor;

use super::scoped::{Scheduler, log_call, run_scoped};
use super::{Strategy, StrategyKind};

/// One call at a time on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl Strategy for Sequential {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Sequential
    }

    fn execute(
        &self,
        request: &RequestDescriptor,
        calls: usize,
    ) -> Result<Duration, TransportError> {
        run_scoped(
            StrategyKind::Sequential,
            Scheduler::CurrentThread,
            request,
            |runtime, client| {
                runtime.block_on(async {
                    for _ in 0..calls {
                        let summary = send_call(&client, request).await?;
                        log_call(StrategyKind::Sequential, &summary);
                    }
                    Ok::<(), TransportError>(())
                })
            },
        )
    }
}
