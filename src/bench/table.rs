use std::time::Duration;

use crate::strategy::StrategyKind;

/// Timing of one strategy at one call count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyResult {
    pub kind: StrategyKind,
    pub calls: usize,
    pub elapsed: Duration,
}

impl StrategyResult {
    /// Whole milliseconds, truncated.
    #[must_use]
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    calls: usize,
    results: Vec<StrategyResult>,
}

impl TableRow {
    #[must_use]
    pub const fn calls(&self) -> usize {
        self.calls
    }

    /// One result per column, in column order.
    #[must_use]
    pub fn results(&self) -> &[StrategyResult] {
        &self.results
    }
}

/// Call counts down the rows, strategies across the columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    columns: Vec<StrategyKind>,
    rows: Vec<TableRow>,
}

impl ResultTable {
    pub(crate) const fn new(columns: Vec<StrategyKind>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row; `results` must hold one entry per column, in order.
    pub(crate) fn push_row(&mut self, calls: usize, results: Vec<StrategyResult>) {
        debug_assert_eq!(results.len(), self.columns.len());
        self.rows.push(TableRow { calls, results });
    }

    #[must_use]
    pub fn columns(&self) -> &[StrategyKind] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Strategy columns plus the leading call-count column.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len().saturating_add(1)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
