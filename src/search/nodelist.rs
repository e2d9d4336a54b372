use super::driver::{Candidate, SearchContext};
use crate::closure::ClosureChecker;
use crate::db::TransactionStore;
use crate::fp::{build_tree, NodeList, ProjectionTree};
use crate::observer::estimate_sets_size;
use crate::Item;

/// Node lists of a prefix's extensions over one shared, numbered tree.
///
/// Candidates follow tree order (most frequent first). The node list kept
/// for `item` holds the nodes of `item` whose root path contains the prefix;
/// joining two siblings keeps the later sibling's nodes that descend from the
/// earlier sibling's nodes.
#[derive(Debug, Clone)]
pub struct NodeListContext<'a> {
    store: &'a TransactionStore,
    tree: &'a ProjectionTree,
    candidates: Vec<Candidate>,
    lists: Vec<NodeList>,
}

/// Builds the numbered tree a [`NodeListContext`] borrows.
pub fn node_list_tree(store: &TransactionStore, min_count: usize) -> ProjectionTree {
    let supports = store.frequent_items(min_count);
    build_tree(store.row_view(), &supports, min_count)
}

impl<'a> NodeListContext<'a> {
    pub fn root(store: &'a TransactionStore, tree: &'a ProjectionTree, min_count: usize) -> Self {
        let (candidates, lists) = tree
            .order()
            .iter()
            .map(|&item| {
                let list = NodeList::for_item(tree, item);
                let candidate = Candidate {
                    item,
                    support: list.support(),
                };
                (candidate, list)
            })
            .filter(|(candidate, _)| candidate.support >= min_count)
            .unzip();

        Self {
            store,
            tree,
            candidates,
            lists,
        }
    }
}

impl SearchContext for NodeListContext<'_> {
    fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    fn project(&self, position: usize, min_count: usize) -> Self {
        let ancestors = &self.lists[position];
        let mut candidates = Vec::new();
        let mut lists = Vec::new();

        for (candidate, list) in self.candidates[position + 1..]
            .iter()
            .zip(&self.lists[position + 1..])
        {
            let joined = list.descendants_of(ancestors);
            let support = joined.support();
            if support >= min_count {
                candidates.push(Candidate {
                    item: candidate.item,
                    support,
                });
                lists.push(joined);
            }
        }

        Self {
            store: self.store,
            tree: self.tree,
            candidates,
            lists,
        }
    }

    fn is_closed(&self, itemset: &[Item], support: usize, _position: usize, child: &Self) -> bool {
        let frontier = child.candidates.iter().map(|candidate| candidate.support);
        if ClosureChecker::has_equal_extension(support, frontier) {
            return false;
        }
        ClosureChecker::new(self.store).is_closed_by_scan(itemset, support)
    }

    fn size_bytes(&self) -> usize {
        let codes: usize = self.lists.iter().map(NodeList::len).sum();
        estimate_sets_size(self.lists.len(), codes * 3)
    }
}
