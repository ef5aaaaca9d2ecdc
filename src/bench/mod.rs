//! Benchmark drivers: the call-count matrix and the one-shot demo.
mod demo;
mod matrix;
mod table;


pub use demo::{DEMO_DIVIDER, run_demo};
pub use matrix::MatrixRunner;
pub use table::{ResultTable, StrategyResult, TableRow};

/// Call counts of the default matrix.
pub const DEFAULT_CALL_COUNTS: [usize; 5] = [10, 30, 50, 70, 90];

/// Call count of the demo run.
pub const DEFAULT_DEMO_CALLS: usize = 10;
