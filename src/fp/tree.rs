use crate::Item;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub item: Option<Item>,
    pub count: usize,
    pub parent: Option<usize>,
    pub children: HashMap<Item, usize>,
    pub preorder: usize,
    pub postorder: usize,
}

/// Prefix tree over transactions sorted by a fixed item order.
///
/// Nodes live in an arena; `parent` is a plain index so the tree holds no
/// reference cycles. `order` lists the items the tree may contain, most
/// frequent first; every inserted path must follow that order.
#[derive(Debug, Clone)]
pub struct ProjectionTree {
    pub nodes: Vec<TreeNode>,
    pub header_table: HashMap<Item, Vec<usize>>,
    pub root_index: usize,
    order: Vec<Item>,
    ranks: HashMap<Item, usize>,
    numbered: bool,
}

impl TreeNode {
    pub fn new_root() -> Self {
        Self {
            item: None,
            count: 0,
            parent: None,
            children: HashMap::new(),
            preorder: 0,
            postorder: 0,
        }
    }

    pub fn new_item(item: Item, count: usize, parent: Option<usize>) -> Self {
        Self {
            item: Some(item),
            count,
            parent,
            children: HashMap::new(),
            preorder: 0,
            postorder: 0,
        }
    }
}

impl ProjectionTree {
    pub fn new(order: Vec<Item>) -> Self {
        let ranks = order
            .iter()
            .enumerate()
            .map(|(rank, &item)| (item, rank))
            .collect();
        Self {
            nodes: vec![TreeNode::new_root()],
            header_table: HashMap::new(),
            root_index: 0,
            order,
            ranks,
            numbered: false,
        }
    }

    /// Items the tree is ordered by, most frequent first.
    pub fn order(&self) -> &[Item] {
        &self.order
    }

    pub fn rank(&self, item: Item) -> Option<usize> {
        self.ranks.get(&item).copied()
    }

    /// Sorts `items` into tree order, dropping items the tree does not rank.
    pub fn sort_by_rank(&self, items: &[Item]) -> Vec<Item> {
        let mut ranked: Vec<(usize, Item)> = items
            .iter()
            .filter_map(|&item| self.rank(item).map(|rank| (rank, item)))
            .collect();
        ranked.sort_unstable();
        ranked.dedup();
        ranked.into_iter().map(|(_, item)| item).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Weight of all inserted transactions, including empty ones.
    pub fn total_count(&self) -> usize {
        self.nodes[self.root_index].count
    }

    /// Inserts `transaction` (already in tree order) with weight `count`,
    /// reusing any shared prefix path.
    pub fn insert_transaction(&mut self, transaction: &[Item], count: usize) {
        debug_assert!(transaction
            .windows(2)
            .all(|w| self.rank(w[0]) < self.rank(w[1])));

        let mut current_index = self.root_index;
        self.nodes[current_index].count += count;
        self.numbered = false;

        for &item in transaction {
            if let Some(&child_index) = self.nodes[current_index].children.get(&item) {
                self.nodes[child_index].count += count;
                current_index = child_index;
            } else {
                let new_index = self.nodes.len();
                self.nodes
                    .push(TreeNode::new_item(item, count, Some(current_index)));
                self.nodes[current_index].children.insert(item, new_index);
                self.header_table.entry(item).or_default().push(new_index);
                current_index = new_index;
            }
        }
    }

    /// Numbers every node with one depth-first pass: preorder on entry,
    /// postorder on exit. Run once after the last insertion.
    pub fn assign_order_numbers(&mut self) {
        let mut preorder = 0;
        let mut postorder = 0;
        let mut stack = vec![(self.root_index, false)];

        while let Some((idx, exiting)) = stack.pop() {
            if exiting {
                self.nodes[idx].postorder = postorder;
                postorder += 1;
                continue;
            }

            self.nodes[idx].preorder = preorder;
            preorder += 1;
            stack.push((idx, true));

            let mut children: Vec<(Item, usize)> = self.nodes[idx]
                .children
                .iter()
                .map(|(&item, &child)| (item, child))
                .collect();
            children.sort_unstable_by(|a, b| b.0.cmp(&a.0));
            stack.extend(children.into_iter().map(|(_, child)| (child, false)));
        }

        self.numbered = true;
    }

    pub fn is_numbered(&self) -> bool {
        self.numbered
    }

    /// `a` is `b` or one of its ancestors.
    pub fn is_ancestor(&self, a: usize, b: usize) -> bool {
        debug_assert!(self.numbered, "order numbers not assigned");
        let (a, b) = (&self.nodes[a], &self.nodes[b]);
        a.preorder <= b.preorder && a.postorder >= b.postorder
    }

    /// Sum of counts along the header chain of `item`.
    pub fn item_support(&self, item: Item) -> usize {
        self.header_table
            .get(&item)
            .map_or(0, |nodes| nodes.iter().map(|&idx| self.nodes[idx].count).sum())
    }

    /// Root paths (root side first, excluding the node itself) of every
    /// occurrence of `item`, each weighted by the occurrence count.
    pub fn conditional_base(&self, item: Item) -> Vec<(Vec<Item>, usize)> {
        self.header_table.get(&item).map_or(Vec::new(), |nodes| {
            nodes
                .iter()
                .map(|&idx| (self.path_to_root(idx), self.nodes[idx].count))
                .collect()
        })
    }

    /// The conditional base with each path repeated once per unit of count.
    pub fn expanded_conditional_base(&self, item: Item) -> Vec<Vec<Item>> {
        self.conditional_base(item)
            .into_iter()
            .flat_map(|(path, count)| std::iter::repeat(path).take(count))
            .collect()
    }

    fn path_to_root(&self, idx: usize) -> Vec<Item> {
        let mut path = Vec::new();
        let mut current = self.nodes[idx].parent;

        while let Some(i) = current {
            if let Some(item) = self.nodes[i].item {
                path.push(item);
            }
            current = self.nodes[i].parent;
        }

        path.reverse();
        path
    }

    pub fn has_single_path(&self) -> bool {
        let mut current_index = self.root_index;

        loop {
            let current_node = &self.nodes[current_index];
            match current_node.children.len() {
                0 => return true,
                1 => {}
                _ => return false,
            }
            match current_node.children.values().next() {
                Some(&child) => current_index = child,
                None => return true,
            }
        }
    }

    /// `(item, count)` pairs from the root down, for a single-path tree.
    pub fn single_path(&self) -> Vec<(Item, usize)> {
        let mut path = Vec::new();
        let mut current_index = self.root_index;

        while let Some(&child_index) = self.nodes[current_index].children.values().next() {
            let child_node = &self.nodes[child_index];
            if let Some(item) = child_node.item {
                path.push((item, child_node.count));
            }
            current_index = child_index;
        }
        path
    }
}
