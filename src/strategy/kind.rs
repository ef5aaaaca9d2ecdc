use std::fmt;

use super::{BoundedPool, Combinator, CombinatorUnbounded, Sequential, Strategy, Unbounded};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Sequential,
    BoundedPool,
    Unbounded,
    Combinator,
    CombinatorUnbounded,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::Sequential,
        StrategyKind::BoundedPool,
        StrategyKind::Unbounded,
        StrategyKind::Combinator,
        StrategyKind::CombinatorUnbounded,
    ];

    /// Name used in log lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            StrategyKind::Sequential => "Sequential",
            StrategyKind::BoundedPool => "Bounded pool",
            StrategyKind::Unbounded => "Unbounded tasks",
            StrategyKind::Combinator => "Combinator",
            StrategyKind::CombinatorUnbounded => "Unbounded + combinator",
        }
    }

    /// Column title in the results table and CSV file.
    #[must_use]
    pub const fn column_header(self) -> &'static str {
        match self {
            StrategyKind::Sequential => "Sync Time (ms)",
            StrategyKind::BoundedPool => "Platform Thread Time (ms)",
            StrategyKind::Unbounded => "Virtual Thread Time (ms)",
            StrategyKind::Combinator => "Mutiny Time (ms)",
            StrategyKind::CombinatorUnbounded => "Virtual + Mutiny Time (ms)",
        }
    }

    #[must_use]
    pub fn strategy(self, pool_size: usize) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Sequential => Box::new(Sequential),
            StrategyKind::BoundedPool => Box::new(BoundedPool::new(pool_size)),
            StrategyKind::Unbounded => Box::new(Unbounded),
            StrategyKind::Combinator => Box::new(Combinator),
            StrategyKind::CombinatorUnbounded => Box::new(CombinatorUnbounded),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
