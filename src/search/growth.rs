use super::driver::{Candidate, SearchContext};
use crate::closure::ClosureChecker;
use crate::db::TransactionStore;
use crate::fp::combinations::all_path_combinations;
use crate::fp::{build_conditional_tree, build_tree, conditional_frequent_items, ProjectionTree};
use crate::observer::estimate_tree_size;
use crate::Item;

/// Conditional prefix tree of a prefix.
///
/// Candidates run from the least to the most frequent item; the projection
/// on an item holds only the items ranked above it, so every itemset is
/// reached through its least frequent item first and exactly once.
#[derive(Debug, Clone)]
pub struct TreeContext<'a> {
    store: &'a TransactionStore,
    tree: ProjectionTree,
    candidates: Vec<Candidate>,
}

impl<'a> TreeContext<'a> {
    pub fn root(store: &'a TransactionStore, min_count: usize) -> Self {
        let supports = store.frequent_items(min_count);
        let tree = build_tree(store.row_view(), &supports, min_count);
        Self::from_tree(store, tree, min_count)
    }

    fn from_tree(store: &'a TransactionStore, tree: ProjectionTree, min_count: usize) -> Self {
        let candidates = conditional_frequent_items(&tree, min_count)
            .into_iter()
            .rev()
            .map(|(item, support)| Candidate { item, support })
            .collect();
        Self {
            store,
            tree,
            candidates,
        }
    }

    pub fn tree(&self) -> &ProjectionTree {
        &self.tree
    }
}

impl SearchContext for TreeContext<'_> {
    fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    fn project(&self, position: usize, min_count: usize) -> Self {
        let pivot = self.candidates[position].item;
        let base = self.tree.conditional_base(pivot);
        let conditional = build_conditional_tree(&base, min_count, self.tree.order());
        Self::from_tree(self.store, conditional, min_count)
    }

    fn is_closed(&self, itemset: &[Item], support: usize, _position: usize, child: &Self) -> bool {
        let frontier = child.candidates.iter().map(|candidate| candidate.support);
        if ClosureChecker::has_equal_extension(support, frontier) {
            return false;
        }
        // Items ranked below the pivot are not in the projection
        ClosureChecker::new(self.store).is_closed_by_scan(itemset, support)
    }

    fn size_bytes(&self) -> usize {
        estimate_tree_size(self.tree.len(), self.tree.order().len())
    }

    fn enumerate_all(&self) -> Option<Vec<(Vec<Item>, usize)>> {
        if self.tree.is_empty() || !self.tree.has_single_path() {
            return None;
        }
        Some(all_path_combinations(&self.tree.single_path(), &[]))
    }
}
