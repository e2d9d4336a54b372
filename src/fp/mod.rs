// Prefix projection tree: arena nodes, conditional projections and node lists

pub mod builder;
pub mod combinations;
pub mod nodelist;
pub mod tree;

pub use builder::{build_conditional_tree, build_tree, conditional_frequent_items, support_order};
pub use nodelist::{NodeList, PpCode};
pub use tree::{ProjectionTree, TreeNode};
