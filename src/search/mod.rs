// Depth-first frequent / closed itemset search

pub mod driver;
pub mod growth;
pub mod horizontal;
pub mod nodelist;
pub mod vertical;

pub use driver::{Candidate, Driver, SearchContext};
pub use growth::TreeContext;
pub use horizontal::HorizontalContext;
pub use nodelist::{node_list_tree, NodeListContext};
pub use vertical::{DiffsetContext, VerticalContext};

use crate::config::{MiningConfig, Strategy};
use crate::db::{StoreOptions, TransactionStore};
use crate::error::Result;
use crate::observer::{MiningObserver, NoopObserver};
use crate::storage::FrequentItemsets;
use crate::Item;

/// Mines `database` in one call.
///
/// `min_support_ratio` must lie in `[0, 1]`; the ratio is checked before the
/// database is touched.
pub fn mine<I, T>(
    database: I,
    min_support_ratio: f64,
    closed_only: bool,
    strategy: Strategy,
) -> Result<FrequentItemsets>
where
    I: IntoIterator<Item = T>,
    T: IntoIterator<Item = Item>,
{
    let config = MiningConfig::new(min_support_ratio)
        .with_closed_only(closed_only)
        .with_strategy(strategy);
    config.validate()?;

    let options = StoreOptions {
        build_columns: strategy.needs_columns(),
        require_non_empty: config.require_non_empty,
    };
    let store = TransactionStore::build_with(database, &options)?;
    mine_with(&store, &config)
}

pub fn mine_with(store: &TransactionStore, config: &MiningConfig) -> Result<FrequentItemsets> {
    mine_observed(store, config, &NoopObserver)
}

pub fn mine_observed(
    store: &TransactionStore,
    config: &MiningConfig,
    observer: &dyn MiningObserver,
) -> Result<FrequentItemsets> {
    config.validate()?;

    if store.is_empty() {
        tracing::debug!("empty database, nothing to mine");
        return Ok(FrequentItemsets::new());
    }

    let min_count = config.min_count(store.num_transactions());
    tracing::debug!(
        strategy = %config.strategy,
        transactions = store.num_transactions(),
        items = store.num_items(),
        min_count,
        closed_only = config.closed_only,
        parallel = config.parallel,
        "mining started"
    );

    let driver = Driver::new(min_count, config.closed_only, observer);
    let result = match config.strategy {
        Strategy::Horizontal => run(&driver, &HorizontalContext::root(store, min_count), config),
        Strategy::Vertical => run(&driver, &VerticalContext::root(store, min_count)?, config),
        Strategy::Diffset => run(&driver, &DiffsetContext::root(store, min_count)?, config),
        Strategy::ProjectedTree => run(&driver, &TreeContext::root(store, min_count), config),
        Strategy::NodeList => {
            let tree = node_list_tree(store, min_count);
            run(&driver, &NodeListContext::root(store, &tree, min_count), config)
        }
    };

    tracing::debug!(
        itemsets = result.len(),
        max_size = result.max_size(),
        "mining finished"
    );
    Ok(result)
}

fn run<C: SearchContext>(driver: &Driver<'_>, root: &C, config: &MiningConfig) -> FrequentItemsets {
    if config.parallel {
        driver.run_parallel(root)
    } else {
        driver.run(root)
    }
}

#[cfg(test)]
mod tests;
