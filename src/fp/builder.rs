use super::tree::ProjectionTree;
use crate::Item;
use std::collections::HashMap;

/// Items ordered by descending support, ties broken by ascending item id.
pub fn support_order(supports: &[(Item, usize)], min_count: usize) -> Vec<Item> {
    let mut frequent_items: Vec<(Item, usize)> = supports
        .iter()
        .copied()
        .filter(|&(_, count)| count >= min_count)
        .collect();

    frequent_items.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    frequent_items.into_iter().map(|(item, _)| item).collect()
}

/// Builds the global tree from `rows`, keeping only items whose support in
/// `supports` reaches `min_count`. The tree comes back numbered.
pub fn build_tree(
    rows: &[Vec<Item>],
    supports: &[(Item, usize)],
    min_count: usize,
) -> ProjectionTree {
    let order = support_order(supports, min_count);
    let mut tree = ProjectionTree::new(order);

    for row in rows {
        let tx_items = tree.sort_by_rank(row);
        tree.insert_transaction(&tx_items, 1);
    }

    tree.assign_order_numbers();
    tree
}

/// Builds the projection of a conditional base, dropping items whose
/// conditional count falls below `min_count`. Paths keep the parent order.
pub fn build_conditional_tree(
    base: &[(Vec<Item>, usize)],
    min_count: usize,
    parent_order: &[Item],
) -> ProjectionTree {
    let mut item_counts: HashMap<Item, usize> = HashMap::new();

    for (path, count) in base {
        for &item in path {
            *item_counts.entry(item).or_insert(0) += count;
        }
    }

    let order: Vec<Item> = parent_order
        .iter()
        .copied()
        .filter(|item| item_counts.get(item).is_some_and(|&count| count >= min_count))
        .collect();

    let mut conditional_tree = ProjectionTree::new(order);

    for (path, count) in base {
        let filtered_path: Vec<Item> = path
            .iter()
            .copied()
            .filter(|&item| conditional_tree.rank(item).is_some())
            .collect();
        conditional_tree.insert_transaction(&filtered_path, *count);
    }

    conditional_tree.assign_order_numbers();
    conditional_tree
}

/// Items of `tree` reaching `min_count`, in tree order, with their supports.
pub fn conditional_frequent_items(tree: &ProjectionTree, min_count: usize) -> Vec<(Item, usize)> {
    tree.order()
        .iter()
        .map(|&item| (item, tree.item_support(item)))
        .filter(|&(_, count)| count >= min_count)
        .collect()
}
