use super::driver::{Candidate, SearchContext};
use crate::closure::ClosureChecker;
use crate::db::TransactionStore;
use crate::observer::estimate_rows_size;
use crate::support::horizontal::local_supports;
use crate::Item;

/// Projected database: the transactions supporting the prefix, each cut down
/// to frontier items greater than the prefix's last item.
///
/// Rows that run out of items are kept so their tids still take part in the
/// closure test.
#[derive(Debug, Clone)]
pub struct HorizontalContext<'a> {
    store: &'a TransactionStore,
    rows: Vec<(usize, Vec<Item>)>,
    candidates: Vec<Candidate>,
}

impl<'a> HorizontalContext<'a> {
    pub fn root(store: &'a TransactionStore, min_count: usize) -> Self {
        let frequent = store.frequent_items(min_count);
        let candidates: Vec<Candidate> = frequent
            .iter()
            .map(|&(item, support)| Candidate { item, support })
            .collect();

        let rows = store
            .row_view()
            .iter()
            .enumerate()
            .map(|(tid, row)| {
                let items = row
                    .iter()
                    .copied()
                    .filter(|&item| store.item_support(item) >= min_count)
                    .collect();
                (tid, items)
            })
            .collect();

        Self {
            store,
            rows,
            candidates,
        }
    }

    pub fn tids(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().map(|(tid, _)| *tid)
    }
}

impl SearchContext for HorizontalContext<'_> {
    fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    fn project(&self, position: usize, min_count: usize) -> Self {
        let pivot = self.candidates[position].item;
        let frontier: Vec<Item> = self.candidates[position + 1..]
            .iter()
            .map(|candidate| candidate.item)
            .collect();

        let rows: Vec<(usize, Vec<Item>)> = self
            .rows
            .iter()
            .filter(|(_, items)| items.binary_search(&pivot).is_ok())
            .map(|(tid, items)| {
                let kept = items
                    .iter()
                    .copied()
                    .filter(|&item| item > pivot && frontier.binary_search(&item).is_ok())
                    .collect();
                (*tid, kept)
            })
            .collect();

        let candidates = local_supports(rows.iter().map(|(_, items)| items.as_slice()))
            .into_iter()
            .filter(|&(_, support)| support >= min_count)
            .map(|(item, support)| Candidate { item, support })
            .collect();

        Self {
            store: self.store,
            rows,
            candidates,
        }
    }

    fn is_closed(&self, itemset: &[Item], support: usize, _position: usize, child: &Self) -> bool {
        let frontier = child.candidates.iter().map(|candidate| candidate.support);
        if ClosureChecker::has_equal_extension(support, frontier) {
            return false;
        }
        ClosureChecker::new(self.store).is_closed_by_tids(itemset, child.tids())
    }

    fn size_bytes(&self) -> usize {
        let items: usize = self.rows.iter().map(|(_, items)| items.len()).sum();
        estimate_rows_size(self.rows.len(), items)
    }
}
