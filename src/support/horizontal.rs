use super::{canonical, contains_all, SupportCounter};
use crate::Item;
use std::collections::BTreeMap;

/// Counts by scanning every row for full containment.
#[derive(Debug, Clone, Copy)]
pub struct HorizontalCounter<'a> {
    rows: &'a [Vec<Item>],
}

impl<'a> HorizontalCounter<'a> {
    /// `rows` must be sorted and deduplicated, as the store keeps them.
    pub fn new(rows: &'a [Vec<Item>]) -> Self {
        Self { rows }
    }
}

impl SupportCounter for HorizontalCounter<'_> {
    fn support(&self, itemset: &[Item]) -> usize {
        let itemset = canonical(itemset);
        self.rows
            .iter()
            .filter(|row| contains_all(row, &itemset))
            .count()
    }
}

/// Support of every item appearing in `rows`, in one pass.
pub fn local_supports<'r, I>(rows: I) -> BTreeMap<Item, usize>
where
    I: IntoIterator<Item = &'r [Item]>,
{
    let mut supports = BTreeMap::new();
    for row in rows {
        for &item in row {
            *supports.entry(item).or_insert(0) += 1;
        }
    }
    supports
}
