//! Support evaluation.
//!
//! Every counter answers the same question: how many transactions contain
//! all items of an itemset. They differ only in the representation they read.

pub mod horizontal;
pub mod projected;
pub mod vertical;

use crate::config::Strategy;
use crate::db::TransactionStore;
use crate::error::Result;
use crate::Item;

pub use horizontal::HorizontalCounter;
pub use projected::{NodeListCounter, ProjectedTreeCounter};
pub use vertical::VerticalCounter;

pub trait SupportCounter {
    fn support(&self, itemset: &[Item]) -> usize;
}

/// Builds the counter matching `strategy` over the whole store.
///
/// Vertical and diffset strategies both count through tid-sets and fail when
/// the store was built without its column view.
pub fn counter_for<'a>(
    strategy: Strategy,
    store: &'a TransactionStore,
) -> Result<Box<dyn SupportCounter + 'a>> {
    Ok(match strategy {
        Strategy::Horizontal => Box::new(HorizontalCounter::new(store.row_view())),
        Strategy::Vertical | Strategy::Diffset => Box::new(VerticalCounter::new(store)?),
        Strategy::ProjectedTree => Box::new(ProjectedTreeCounter::new(store)),
        Strategy::NodeList => Box::new(NodeListCounter::new(store)),
    })
}

/// Whether sorted `row` contains every item of sorted `itemset`.
pub(crate) fn contains_all(row: &[Item], itemset: &[Item]) -> bool {
    if itemset.len() > row.len() {
        return false;
    }
    let mut r = 0;
    for &item in itemset {
        while r < row.len() && row[r] < item {
            r += 1;
        }
        if r == row.len() || row[r] != item {
            return false;
        }
        r += 1;
    }
    true
}

pub(crate) fn canonical(itemset: &[Item]) -> Vec<Item> {
    let mut items = itemset.to_vec();
    items.sort_unstable();
    items.dedup();
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> TransactionStore {
        TransactionStore::build(vec![
            vec![1, 2, 3],
            vec![1, 2, 4],
            vec![1, 2],
            vec![1, 3],
            vec![2, 3],
        ])
    }

    #[test]
    fn test_contains_all() {
        assert!(contains_all(&[1, 2, 3], &[1, 3]));
        assert!(contains_all(&[1, 2, 3], &[]));
        assert!(!contains_all(&[1, 2, 3], &[4]));
        assert!(!contains_all(&[1, 3], &[1, 2, 3]));
    }

    #[test]
    fn test_counters_agree_on_sample() {
        let store = sample_store();
        let queries: Vec<(Vec<Item>, usize)> = vec![
            (vec![], 5),
            (vec![1], 4),
            (vec![2], 4),
            (vec![3], 3),
            (vec![4], 1),
            (vec![2, 1], 3),
            (vec![1, 3], 2),
            (vec![3, 2], 2),
            (vec![1, 2, 3], 1),
            (vec![1, 2, 4], 1),
            (vec![3, 4], 0),
            (vec![7], 0),
            (vec![1, 1], 4),
        ];

        for strategy in Strategy::ALL {
            let counter = counter_for(strategy, &store).unwrap();
            for (itemset, expected) in &queries {
                assert_eq!(
                    counter.support(itemset),
                    *expected,
                    "{strategy} support of {itemset:?}"
                );
            }
        }
    }
}
