use super::tree::ProjectionTree;
use crate::Item;

/// Preorder/postorder code of a tree node with its count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PpCode {
    pub pre: usize,
    pub post: usize,
    pub count: usize,
}

impl PpCode {
    pub fn is_ancestor_of(&self, other: &PpCode) -> bool {
        self.pre < other.pre && self.post > other.post
    }
}

/// Nodes of an itemset's last item whose root path holds the rest of the
/// itemset, sorted by preorder.
///
/// Support of the itemset is the sum of the node counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeList {
    codes: Vec<PpCode>,
}

impl NodeList {
    pub fn for_item(tree: &ProjectionTree, item: Item) -> Self {
        let mut codes: Vec<PpCode> = tree
            .header_table
            .get(&item)
            .map_or(Vec::new(), |nodes| {
                nodes
                    .iter()
                    .map(|&idx| {
                        let node = &tree.nodes[idx];
                        PpCode {
                            pre: node.preorder,
                            post: node.postorder,
                            count: node.count,
                        }
                    })
                    .collect()
            });
        codes.sort_unstable_by_key(|code| code.pre);
        Self { codes }
    }

    pub fn codes(&self) -> &[PpCode] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn support(&self) -> usize {
        self.codes.iter().map(|code| code.count).sum()
    }

    /// Codes of `self` that descend from some code of `ancestors`.
    ///
    /// `ancestors` must carry nodes of a single item, so their subtrees are
    /// disjoint preorder intervals and one merge pass suffices.
    pub fn descendants_of(&self, ancestors: &NodeList) -> NodeList {
        let mut codes = Vec::new();
        let mut a = 0;

        for code in &self.codes {
            while a < ancestors.codes.len() && ancestors.codes[a].post < code.post {
                a += 1;
            }
            if let Some(ancestor) = ancestors.codes.get(a) {
                if ancestor.is_ancestor_of(code) {
                    codes.push(*code);
                }
            } else {
                break;
            }
        }

        NodeList { codes }
    }
}
