use crate::Item;
use std::collections::BTreeMap;

/// Memory-efficient itemset storage using flat arrays
#[derive(Debug, Clone, Default)]
pub struct ItemsetStorage {
    items: Vec<Item>,
    offsets: Vec<(usize, usize)>,
    supports: Vec<usize>,
}

/// All itemsets of one size, in discovery order
#[derive(Debug, Clone)]
pub struct FrequentLevel {
    storage: ItemsetStorage,
    pub itemset_size: usize,
}

impl ItemsetStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `items` in canonical (sorted, deduplicated) form.
    pub fn add_itemset(&mut self, mut items: Vec<Item>, support: usize) -> usize {
        items.sort_unstable();
        items.dedup();

        let start_idx = self.items.len();
        self.items.extend_from_slice(&items);
        self.offsets.push((start_idx, items.len()));
        self.supports.push(support);

        self.offsets.len() - 1
    }

    pub fn get_itemset(&self, idx: usize) -> &[Item] {
        let (start, length) = self.offsets[idx];
        &self.items[start..start + length]
    }

    pub fn get_support(&self, idx: usize) -> usize {
        self.supports[idx]
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    fn append(&mut self, other: ItemsetStorage) {
        let shift = self.items.len();
        self.items.extend(other.items);
        self.offsets
            .extend(other.offsets.into_iter().map(|(start, len)| (start + shift, len)));
        self.supports.extend(other.supports);
    }
}

impl FrequentLevel {
    pub fn new(itemset_size: usize) -> Self {
        Self {
            storage: ItemsetStorage::new(),
            itemset_size,
        }
    }

    pub fn add_itemset(&mut self, items: Vec<Item>, support: usize) -> usize {
        let idx = self.storage.add_itemset(items, support);
        debug_assert_eq!(self.storage.get_itemset(idx).len(), self.itemset_size);
        idx
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn get_itemset(&self, idx: usize) -> &[Item] {
        self.storage.get_itemset(idx)
    }

    pub fn get_support(&self, idx: usize) -> usize {
        self.storage.get_support(idx)
    }

    pub fn iter_itemsets(&self) -> impl Iterator<Item = &[Item]> {
        (0..self.storage.len()).map(move |idx| self.get_itemset(idx))
    }

    /// Itemsets paired with their supports.
    pub fn iter(&self) -> impl Iterator<Item = (&[Item], usize)> {
        (0..self.storage.len()).map(move |idx| (self.get_itemset(idx), self.get_support(idx)))
    }
}

/// Collector of accepted itemsets, grouped by size.
///
/// `levels[k]` holds the itemsets of size `k + 1`. The search never hands the
/// same itemset over twice, so no deduplication happens here.
#[derive(Debug, Clone, Default)]
pub struct FrequentItemsets {
    levels: Vec<FrequentLevel>,
}

impl FrequentItemsets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept(&mut self, itemset: Vec<Item>, support: usize) {
        let size = itemset.len();
        if size == 0 {
            return;
        }
        while self.levels.len() < size {
            self.levels.push(FrequentLevel::new(self.levels.len() + 1));
        }
        self.levels[size - 1].add_itemset(itemset, support);
    }

    /// Appends every itemset of `other`, keeping its discovery order.
    pub fn merge(&mut self, other: FrequentItemsets) {
        for level in other.levels {
            let size = level.itemset_size;
            while self.levels.len() < size {
                self.levels.push(FrequentLevel::new(self.levels.len() + 1));
            }
            self.levels[size - 1].storage.append(level.storage);
        }
    }

    pub fn len(&self) -> usize {
        self.levels.iter().map(FrequentLevel::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of itemsets per size, skipping empty sizes.
    pub fn count_by_size(&self) -> BTreeMap<usize, usize> {
        self.levels
            .iter()
            .filter(|level| !level.is_empty())
            .map(|level| (level.itemset_size, level.len()))
            .collect()
    }

    /// Non-empty levels in ascending size.
    pub fn levels(&self) -> impl Iterator<Item = &FrequentLevel> {
        self.levels.iter().filter(|level| !level.is_empty())
    }

    pub fn level(&self, itemset_size: usize) -> Option<&FrequentLevel> {
        itemset_size
            .checked_sub(1)
            .and_then(|idx| self.levels.get(idx))
    }

    pub fn max_size(&self) -> usize {
        self.levels().map(|level| level.itemset_size).max().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[Item], usize)> {
        self.levels.iter().flat_map(FrequentLevel::iter)
    }

    pub fn support_of(&self, itemset: &[Item]) -> Option<usize> {
        let mut key = itemset.to_vec();
        key.sort_unstable();
        key.dedup();
        self.level(key.len())?
            .iter()
            .find(|(items, _)| *items == key.as_slice())
            .map(|(_, support)| support)
    }

    /// Itemset to support map, convenient for comparing result sets.
    pub fn to_map(&self) -> BTreeMap<Vec<Item>, usize> {
        self.iter()
            .map(|(items, support)| (items.to_vec(), support))
            .collect()
    }
}
