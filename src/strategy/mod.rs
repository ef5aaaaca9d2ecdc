//! Concurrency strategies for issuing a batch of identical calls.
//!
//! Every strategy owns its runtime and HTTP client for exactly one
//! invocation. Both are created and torn down inside the measured window, so
//! the reported time covers setup, dispatch, completion and teardown.
mod bounded_pool;
mod combinator;
mod kind;
mod scoped;
mod sequential;
mod unbounded;


use std::time::Duration;

use crate::error::TransportError;
use crate::request::RequestDescriptor;

pub use bounded_pool::BoundedPool;
pub use combinator::{Combinator, CombinatorUnbounded};
pub use kind::StrategyKind;
pub use sequential::Sequential;
pub use unbounded::Unbounded;

/// Worker count of the bounded pool unless configured otherwise.
pub const DEFAULT_POOL_SIZE: usize = 10;

pub trait Strategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Issues exactly `calls` requests and returns the wall-clock time the
    /// whole invocation took.
    ///
    /// # Errors
    ///
    /// Returns the first transport failure; the remaining calls are abandoned
    /// and no partial timing is reported.
    fn execute(&self, request: &RequestDescriptor, calls: usize)
    -> Result<Duration, TransportError>;
}

/// The five strategies in column order.
#[must_use]
pub fn default_strategies(pool_size: usize) -> Vec<Box<dyn Strategy>> {
    StrategyKind::ALL
        .iter()
        .map(|kind| kind.strategy(pool_size))
        .collect()
}
