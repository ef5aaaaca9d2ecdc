use tracing::info;

use crate::error::TransportError;
use crate::request::RequestDescriptor;
use crate::strategy::{Strategy, default_strategies};

use super::table::{ResultTable, StrategyResult};

/// Runs every registered strategy for every call count.
pub struct MatrixRunner {
    strategies: Vec<Box<dyn Strategy>>,
}

impl MatrixRunner {
    #[must_use]
    pub fn new(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self { strategies }
    }

    /// The five built-in strategies in column order.
    #[must_use]
    pub fn with_defaults(pool_size: usize) -> Self {
        Self::new(default_strategies(pool_size))
    }

    /// Rows follow `call_counts`; within a row the strategies run one after
    /// another in registration order, each fully torn down before the next
    /// starts.
    ///
    /// # Errors
    ///
    /// Returns the first strategy failure. No partial table is produced.
    pub fn run(
        &self,
        request: &RequestDescriptor,
        call_counts: &[usize],
    ) -> Result<ResultTable, TransportError> {
        let mut table =
            ResultTable::new(self.strategies.iter().map(|strategy| strategy.kind()).collect());

        for &calls in call_counts {
            info!("Running {} strategies with {} calls", self.strategies.len(), calls);
            let mut results = Vec::with_capacity(self.strategies.len());
            for strategy in &self.strategies {
                let elapsed = strategy.execute(request, calls)?;
                let result = StrategyResult {
                    kind: strategy.kind(),
                    calls,
                    elapsed,
                };
                info!(
                    "{} Execution Time: {} ms ({} calls)",
                    result.kind.label(),
                    result.elapsed_ms(),
                    calls
                );
                results.push(result);
            }
            table.push_row(calls, results);
        }

        Ok(table)
    }
}
