use crate::error::{MiningError, Result};
use std::fmt;
use std::str::FromStr;

/// Support-counting strategy used by the search driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Projected databases scanned row by row (H-Mine, LCMFreq, RELIM)
    Horizontal,
    /// Tid-set intersection (ECLAT)
    Vertical,
    /// Diffsets propagated instead of tid-sets (dECLAT)
    Diffset,
    /// Conditional prefix trees (FP-growth, PrePost)
    ProjectedTree,
    /// Node lists joined through preorder/postorder codes (PrePost, FIN)
    NodeList,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Horizontal,
        Strategy::Vertical,
        Strategy::Diffset,
        Strategy::ProjectedTree,
        Strategy::NodeList,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Horizontal => "horizontal",
            Strategy::Vertical => "vertical",
            Strategy::Diffset => "diffset",
            Strategy::ProjectedTree => "projected-tree",
            Strategy::NodeList => "node-list",
        }
    }

    /// Whether the strategy reads the column view of the store
    pub fn needs_columns(&self) -> bool {
        matches!(self, Strategy::Vertical | Strategy::Diffset)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = MiningError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "horizontal" | "hmine" | "h-mine" | "lcmfreq" | "relim" => Ok(Strategy::Horizontal),
            "vertical" | "eclat" => Ok(Strategy::Vertical),
            "diffset" | "declat" => Ok(Strategy::Diffset),
            "projected-tree" | "projectedtree" | "fp-growth" | "fpgrowth" => {
                Ok(Strategy::ProjectedTree)
            }
            "node-list" | "nodelist" | "prepost" | "fin" => Ok(Strategy::NodeList),
            _ => Err(MiningError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Parameters of a single mining run
#[derive(Debug, Clone)]
pub struct MiningConfig {
    /// Minimum support as a fraction of the number of transactions
    pub min_support_ratio: f64,
    /// Keep only closed itemsets
    pub closed_only: bool,
    pub strategy: Strategy,
    /// Dispatch top-level branches to the rayon pool
    pub parallel: bool,
    /// Reject databases containing empty transactions
    pub require_non_empty: bool,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support_ratio: 0.4,
            closed_only: false,
            strategy: Strategy::Vertical,
            parallel: false,
            require_non_empty: false,
        }
    }
}

impl MiningConfig {
    pub fn new(min_support_ratio: f64) -> Self {
        Self {
            min_support_ratio,
            ..Self::default()
        }
    }

    pub fn with_closed_only(mut self, closed_only: bool) -> Self {
        self.closed_only = closed_only;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_require_non_empty(mut self, require_non_empty: bool) -> Self {
        self.require_non_empty = require_non_empty;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let ratio = self.min_support_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(MiningError::InvalidRatio(ratio));
        }
        Ok(())
    }

    /// Absolute support threshold for a database of `num_transactions` rows.
    pub fn min_count(&self, num_transactions: usize) -> usize {
        min_count(self.min_support_ratio, num_transactions)
    }
}

/// `ceil(ratio * n)`, never below one.
///
/// The product is nudged down by a small epsilon so that ratios such as `0.7`
/// over ten transactions give 7 rather than 8.
pub fn min_count(ratio: f64, num_transactions: usize) -> usize {
    let exact = ratio * num_transactions as f64;
    let count = (exact - 1e-9).ceil().max(0.0) as usize;
    count.max(1)
}
