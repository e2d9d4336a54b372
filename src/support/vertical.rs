use super::SupportCounter;
use crate::db::{ColumnView, TidSet, TransactionStore};
use crate::error::Result;
use crate::Item;

/// Counts by intersecting the tid-sets of the itemset's items.
#[derive(Debug, Clone, Copy)]
pub struct VerticalCounter<'a> {
    columns: &'a ColumnView,
    num_transactions: usize,
}

impl<'a> VerticalCounter<'a> {
    pub fn new(store: &'a TransactionStore) -> Result<Self> {
        Ok(Self {
            columns: store.column_view()?,
            num_transactions: store.num_transactions(),
        })
    }

    /// Tid-set of the whole itemset, or `None` for the empty itemset.
    pub fn tidset(&self, itemset: &[Item]) -> Option<TidSet> {
        let mut sets: Vec<&TidSet> = Vec::with_capacity(itemset.len());
        for item in itemset {
            match self.columns.get(item) {
                Some(tids) => sets.push(tids),
                None => return Some(TidSet::new()),
            }
        }
        // Smallest first keeps every intermediate result small
        sets.sort_unstable_by_key(|tids| tids.len());

        let (first, rest) = sets.split_first()?;
        let mut acc = (*first).clone();
        for tids in rest {
            if acc.is_empty() {
                break;
            }
            acc = acc.intersect(tids);
        }
        Some(acc)
    }
}

impl SupportCounter for VerticalCounter<'_> {
    fn support(&self, itemset: &[Item]) -> usize {
        self.tidset(itemset)
            .map_or(self.num_transactions, |tids| tids.len())
    }
}

/// Tid-set of `prefix ∪ {item}` from the prefix's tid-set and the item's column.
pub fn extend_tidset(prefix: &TidSet, item_tids: &TidSet) -> TidSet {
    prefix.intersect(item_tids)
}

/// Diffset of `P ∪ {y}` relative to `P`, from two tid-sets: `t(P) \ t(Py)`.
pub fn diffset_from_tidsets(prefix: &TidSet, extended: &TidSet) -> TidSet {
    prefix.difference(extended)
}

/// Diffset of `Pxy` relative to `Px`, from the diffsets of `Px` and `Py`
/// relative to `P`: `d(Py) \ d(Px)`.
pub fn diffset_from_diffsets(dx: &TidSet, dy: &TidSet) -> TidSet {
    dy.difference(dx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tidset_of_itemset() {
        let store = TransactionStore::build(vec![vec![1, 2], vec![1, 3], vec![1, 2, 3]]);
        let counter = VerticalCounter::new(&store).unwrap();

        assert_eq!(counter.tidset(&[1, 2]).unwrap().as_slice(), &[0, 2]);
        assert_eq!(counter.tidset(&[4]).unwrap().len(), 0);
        assert!(counter.tidset(&[]).is_none());
        assert_eq!(counter.support(&[]), 3);
    }

    #[test]
    fn test_diffset_identities() {
        // t(P) = {0,1,2,3,4}, t(Px) = {0,1,3}, t(Py) = {0,2,3}
        let tp: TidSet = (0..5).collect();
        let tx: TidSet = [0, 1, 3].into_iter().collect();
        let ty: TidSet = [0, 2, 3].into_iter().collect();

        let dx = diffset_from_tidsets(&tp, &tx);
        let dy = diffset_from_tidsets(&tp, &ty);
        let dxy = diffset_from_diffsets(&dx, &dy);

        // support(Pxy) = support(Px) - |d(Pxy)| = |t(Px) ∩ t(Py)|
        let txy = extend_tidset(&tx, &ty);
        assert_eq!(tx.len() - dxy.len(), txy.len());
        assert_eq!(dxy, diffset_from_tidsets(&tx, &txy));
    }
}
