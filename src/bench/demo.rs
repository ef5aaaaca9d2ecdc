use std::io::Write;

use tracing::info;

use crate::error::AppResult;
use crate::request::RequestDescriptor;
use crate::strategy::default_strategies;

use super::table::StrategyResult;

pub const DEMO_DIVIDER: &str =
    "=========================================================================================";

/// Runs each strategy once at `calls`, writing a divider to `out` between
/// strategies.
///
/// # Errors
///
/// Returns the first strategy failure, or an error if `out` cannot be
/// written.
pub fn run_demo<W: Write>(
    request: &RequestDescriptor,
    calls: usize,
    pool_size: usize,
    out: &mut W,
) -> AppResult<Vec<StrategyResult>> {
    let strategies = default_strategies(pool_size);
    let mut results = Vec::with_capacity(strategies.len());

    for (index, strategy) in strategies.iter().enumerate() {
        if index > 0 {
            writeln!(out, "{}", DEMO_DIVIDER)?;
            out.flush()?;
        }
        let elapsed = strategy.execute(request, calls)?;
        let result = StrategyResult {
            kind: strategy.kind(),
            calls,
            elapsed,
        };
        info!(
            "{} Execution Time: {} ms",
            result.kind.label(),
            result.elapsed_ms()
        );
        results.push(result);
    }

    Ok(results)
}
