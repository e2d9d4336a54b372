//! Closure tests.
//!
//! An itemset is closed when every single-item extension has strictly lower
//! support, which holds exactly when no item outside the itemset occurs in all
//! of its supporting transactions. The local checks below work from the
//! search state at hand (supporting tids, tid-sets, frontier supports); the
//! global oracle compares finished results against each other.

use crate::db::{ColumnView, TidSet, TransactionStore};
use crate::storage::FrequentItemsets;
use crate::support::{canonical, contains_all};
use crate::Item;

#[derive(Debug, Clone, Copy)]
pub struct ClosureChecker<'a> {
    store: &'a TransactionStore,
}

impl<'a> ClosureChecker<'a> {
    pub fn new(store: &'a TransactionStore) -> Self {
        Self { store }
    }

    /// Items common to every row in `tids`; `None` when `tids` is empty.
    pub fn closure_of_tids<I>(&self, tids: I) -> Option<Vec<Item>>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut tids = tids.into_iter();
        let first = tids.next()?;
        let mut common = self.store.row(first).to_vec();
        for tid in tids {
            if common.is_empty() {
                break;
            }
            let row = self.store.row(tid);
            common.retain(|item| row.binary_search(item).is_ok());
        }
        Some(common)
    }

    /// Closed iff the rows supporting `itemset` share no other item.
    pub fn is_closed_by_tids<I>(&self, itemset: &[Item], tids: I) -> bool
    where
        I: IntoIterator<Item = usize>,
    {
        self.closure_of_tids(tids)
            .map_or(true, |closure| closure.len() <= itemset.len())
    }

    /// Closed iff no column outside `itemset` covers its tid-set.
    pub fn is_closed_by_columns(itemset: &[Item], tids: &TidSet, columns: &ColumnView) -> bool {
        !columns.iter().any(|(item, column)| {
            column.len() >= tids.len()
                && !itemset.contains(item)
                && tids.is_subset(column)
        })
    }

    /// Cheap pre-check: some frontier extension keeps the full support.
    pub fn has_equal_extension<I>(support: usize, frontier: I) -> bool
    where
        I: IntoIterator<Item = usize>,
    {
        frontier.into_iter().any(|extension| extension == support)
    }

    /// Horizontal verification over the whole store.
    pub fn is_closed_by_scan(&self, itemset: &[Item], support: usize) -> bool {
        if support == 0 {
            return true;
        }
        let itemset = canonical(itemset);
        let tids = self
            .store
            .row_view()
            .iter()
            .enumerate()
            .filter(|(_, row)| contains_all(row, &itemset))
            .map(|(tid, _)| tid);
        self.is_closed_by_tids(&itemset, tids)
    }
}

/// Keeps the itemsets with no larger itemset of equal support containing them.
///
/// Quadratic in the number of itemsets; meant as a reference for the local
/// checks, not for production runs.
pub fn filter_closed_global(result: &FrequentItemsets) -> FrequentItemsets {
    let all: Vec<(&[Item], usize)> = result.iter().collect();
    let mut closed = FrequentItemsets::new();

    for &(itemset, support) in &all {
        let absorbed = all.iter().any(|&(other, other_support)| {
            other_support == support
                && other.len() > itemset.len()
                && contains_all(other, itemset)
        });
        if !absorbed {
            closed.accept(itemset.to_vec(), support);
        }
    }

    closed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> TransactionStore {
        // {1,2} always occur together
        TransactionStore::build(vec![vec![1, 2, 3], vec![1, 2], vec![3, 4], vec![1, 2, 4]])
    }

    #[test]
    fn test_closure_of_tids() {
        let store = store();
        let checker = ClosureChecker::new(&store);
        assert_eq!(checker.closure_of_tids([0, 1, 3]), Some(vec![1, 2]));
        assert_eq!(checker.closure_of_tids([0, 2]), Some(vec![3]));
        assert_eq!(checker.closure_of_tids(std::iter::empty()), None);

        assert!(!checker.is_closed_by_tids(&[1], [0, 1, 3]));
        assert!(checker.is_closed_by_tids(&[1, 2], [0, 1, 3]));
    }

    #[test]
    fn test_closed_by_columns() {
        let store = store();
        let columns = store.column_view().unwrap();
        let t1 = columns[&1].clone();
        assert!(!ClosureChecker::is_closed_by_columns(&[1], &t1, columns));
        assert!(ClosureChecker::is_closed_by_columns(&[1, 2], &t1, columns));

        let t3 = columns[&3].clone();
        assert!(ClosureChecker::is_closed_by_columns(&[3], &t3, columns));
    }

    #[test]
    fn test_scan_and_frontier_checks() {
        let store = store();
        let checker = ClosureChecker::new(&store);
        assert!(!checker.is_closed_by_scan(&[2], 3));
        assert!(checker.is_closed_by_scan(&[1, 2], 3));
        assert!(checker.is_closed_by_scan(&[4], 2));

        assert!(ClosureChecker::has_equal_extension(3, [1, 3]));
        assert!(!ClosureChecker::has_equal_extension(3, [2, 1]));
    }

    #[test]
    fn test_global_filter() {
        let mut result = FrequentItemsets::new();
        result.accept(vec![1], 3);
        result.accept(vec![2], 3);
        result.accept(vec![3], 2);
        result.accept(vec![1, 2], 3);

        let closed = filter_closed_global(&result);
        let map = closed.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&vec![1, 2]], 3);
        assert_eq!(map[&vec![3]], 2);
    }
}
