use super::SupportCounter;
use crate::db::TransactionStore;
use crate::fp::{build_conditional_tree, build_tree, NodeList, ProjectionTree};
use crate::Item;

fn full_tree(store: &TransactionStore) -> ProjectionTree {
    let supports = store.frequent_items(1);
    build_tree(store.row_view(), &supports, 1)
}

/// Counts by projecting the prefix tree on one item at a time.
///
/// The itemset is sorted into tree order and its deepest item is split off:
/// the conditional base of that item becomes a fresh tree in which the rest of
/// the itemset is counted. The last remaining item is counted along its
/// header chain.
#[derive(Debug, Clone)]
pub struct ProjectedTreeCounter {
    tree: ProjectionTree,
}

impl ProjectedTreeCounter {
    pub fn new(store: &TransactionStore) -> Self {
        Self {
            tree: full_tree(store),
        }
    }

    pub fn tree(&self) -> &ProjectionTree {
        &self.tree
    }
}

fn projected_support(tree: &ProjectionTree, itemset: &[Item]) -> usize {
    match itemset.split_last() {
        None => tree.total_count(),
        Some((&last, [])) => tree.item_support(last),
        Some((&last, rest)) => {
            let base = tree.conditional_base(last);
            if base.is_empty() {
                return 0;
            }
            let conditional = build_conditional_tree(&base, 1, tree.order());
            projected_support(&conditional, rest)
        }
    }
}

impl SupportCounter for ProjectedTreeCounter {
    fn support(&self, itemset: &[Item]) -> usize {
        let ranked = self.tree.sort_by_rank(itemset);
        if ranked.len() < super::canonical(itemset).len() {
            // An item absent from the tree never occurs
            return 0;
        }
        projected_support(&self.tree, &ranked)
    }
}

/// Counts with node lists joined through preorder/postorder codes.
#[derive(Debug, Clone)]
pub struct NodeListCounter {
    tree: ProjectionTree,
}

impl NodeListCounter {
    pub fn new(store: &TransactionStore) -> Self {
        Self {
            tree: full_tree(store),
        }
    }

    /// Node list of `itemset`, or `None` when it is empty or holds an item
    /// the tree never saw.
    pub fn node_list(&self, itemset: &[Item]) -> Option<NodeList> {
        let ranked = self.tree.sort_by_rank(itemset);
        if ranked.is_empty() || ranked.len() < super::canonical(itemset).len() {
            return None;
        }

        let mut items = ranked.into_iter();
        let first = items.next()?;
        let mut list = NodeList::for_item(&self.tree, first);
        for item in items {
            if list.is_empty() {
                break;
            }
            list = NodeList::for_item(&self.tree, item).descendants_of(&list);
        }
        Some(list)
    }
}

impl SupportCounter for NodeListCounter {
    fn support(&self, itemset: &[Item]) -> usize {
        if itemset.is_empty() {
            return self.tree.total_count();
        }
        self.node_list(itemset).map_or(0, |list| list.support())
    }
}
