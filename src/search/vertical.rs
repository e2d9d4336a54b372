use super::driver::{Candidate, SearchContext};
use crate::closure::ClosureChecker;
use crate::db::{ColumnView, TidSet, TransactionStore};
use crate::error::Result;
use crate::observer::estimate_sets_size;
use crate::support::vertical::{diffset_from_diffsets, diffset_from_tidsets, extend_tidset};
use crate::Item;

/// Equivalence class of a prefix: each frontier item with the tid-set of
/// `prefix ∪ {item}`.
#[derive(Debug, Clone)]
pub struct VerticalContext<'a> {
    columns: &'a ColumnView,
    candidates: Vec<Candidate>,
    tidsets: Vec<TidSet>,
}

impl<'a> VerticalContext<'a> {
    pub fn root(store: &'a TransactionStore, min_count: usize) -> Result<Self> {
        let columns = store.column_view()?;
        let (candidates, tidsets) = columns
            .iter()
            .filter(|(_, tids)| tids.len() >= min_count)
            .map(|(&item, tids)| {
                let candidate = Candidate {
                    item,
                    support: tids.len(),
                };
                (candidate, tids.clone())
            })
            .unzip();

        Ok(Self {
            columns,
            candidates,
            tidsets,
        })
    }
}

impl SearchContext for VerticalContext<'_> {
    fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    fn project(&self, position: usize, min_count: usize) -> Self {
        let prefix_tids = &self.tidsets[position];
        let mut candidates = Vec::new();
        let mut tidsets = Vec::new();

        for (candidate, tids) in self.candidates[position + 1..]
            .iter()
            .zip(&self.tidsets[position + 1..])
        {
            let extended = extend_tidset(prefix_tids, tids);
            if extended.len() >= min_count {
                candidates.push(Candidate {
                    item: candidate.item,
                    support: extended.len(),
                });
                tidsets.push(extended);
            }
        }

        Self {
            columns: self.columns,
            candidates,
            tidsets,
        }
    }

    fn is_closed(&self, itemset: &[Item], support: usize, position: usize, child: &Self) -> bool {
        let frontier = child.candidates.iter().map(|candidate| candidate.support);
        if ClosureChecker::has_equal_extension(support, frontier) {
            return false;
        }
        ClosureChecker::is_closed_by_columns(itemset, &self.tidsets[position], self.columns)
    }

    fn size_bytes(&self) -> usize {
        let tids: usize = self.tidsets.iter().map(TidSet::len).sum();
        estimate_sets_size(self.tidsets.len(), tids)
    }
}

/// Equivalence class carried as diffsets.
///
/// At the root the sets are plain tid-sets. Below it, the set stored for
/// `item` is `t(P) \ t(P ∪ {item})`, where `P` is the class prefix.
/// `t(P)` itself rides along for the closure test.
#[derive(Debug, Clone)]
pub struct DiffsetContext<'a> {
    store: &'a TransactionStore,
    prefix_tids: TidSet,
    candidates: Vec<Candidate>,
    sets: Vec<TidSet>,
    diffsets: bool,
}

impl<'a> DiffsetContext<'a> {
    pub fn root(store: &'a TransactionStore, min_count: usize) -> Result<Self> {
        let columns = store.column_view()?;
        let (candidates, sets) = columns
            .iter()
            .filter(|(_, tids)| tids.len() >= min_count)
            .map(|(&item, tids)| {
                let candidate = Candidate {
                    item,
                    support: tids.len(),
                };
                (candidate, tids.clone())
            })
            .unzip();

        Ok(Self {
            store,
            prefix_tids: TidSet::full(store.num_transactions()),
            candidates,
            sets,
            diffsets: false,
        })
    }

    /// Transactions supporting the class prefix.
    pub fn prefix_tids(&self) -> &TidSet {
        &self.prefix_tids
    }
}

impl SearchContext for DiffsetContext<'_> {
    fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    fn project(&self, position: usize, min_count: usize) -> Self {
        let prefix = self.candidates[position];
        let prefix_set = &self.sets[position];
        let mut candidates = Vec::new();
        let mut sets = Vec::new();

        for (candidate, set) in self.candidates[position + 1..]
            .iter()
            .zip(&self.sets[position + 1..])
        {
            let diffset = if self.diffsets {
                diffset_from_diffsets(prefix_set, set)
            } else {
                diffset_from_tidsets(prefix_set, set)
            };
            let support = prefix.support - diffset.len();
            if support >= min_count {
                candidates.push(Candidate {
                    item: candidate.item,
                    support,
                });
                sets.push(diffset);
            }
        }

        // t(PX) = t(P) \ d(PX)
        let prefix_tids = if self.diffsets {
            self.prefix_tids.difference(prefix_set)
        } else {
            prefix_set.clone()
        };

        Self {
            store: self.store,
            prefix_tids,
            candidates,
            sets,
            diffsets: true,
        }
    }

    fn is_closed(&self, itemset: &[Item], support: usize, _position: usize, child: &Self) -> bool {
        let frontier = child.candidates.iter().map(|candidate| candidate.support);
        if ClosureChecker::has_equal_extension(support, frontier) {
            return false;
        }
        ClosureChecker::new(self.store).is_closed_by_tids(itemset, child.prefix_tids.iter())
    }

    fn size_bytes(&self) -> usize {
        let tids: usize = self.sets.iter().map(TidSet::len).sum();
        estimate_sets_size(self.sets.len() + 1, tids + self.prefix_tids.len())
    }
}
