use super::tidset::TidSet;
use crate::error::{MiningError, Result};
use crate::Item;
use ndarray::ArrayView2;
use std::collections::BTreeMap;

/// Item to tid-set mapping, ordered by item id
pub type ColumnView = BTreeMap<Item, TidSet>;

#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Build the item to tid-set mapping alongside the rows
    pub build_columns: bool,
    /// Fail on empty transactions instead of counting them as zero-support rows
    pub require_non_empty: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            build_columns: true,
            require_non_empty: false,
        }
    }
}

/// Immutable transaction database with row and column views.
#[derive(Debug, Clone)]
pub struct TransactionStore {
    rows: Vec<Vec<Item>>,
    columns: Option<ColumnView>,
    item_supports: BTreeMap<Item, usize>,
}

impl TransactionStore {
    pub fn build<I, T>(rows: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: IntoIterator<Item = Item>,
    {
        let mut builder = StoreBuilder::new(StoreOptions::default());
        builder.extend_rows(rows);
        builder.store()
    }

    pub fn build_with<I, T>(rows: I, options: &StoreOptions) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: IntoIterator<Item = Item>,
    {
        let mut builder = StoreBuilder::new(options.clone());
        builder.extend(rows)?;
        Ok(builder.finish())
    }

    /// Dense 0/1 matrix, one row per transaction and one column per item.
    pub fn from_matrix(matrix: ArrayView2<i32>, options: &StoreOptions) -> Result<Self> {
        let rows = matrix.rows().into_iter().map(|row| {
            row.iter()
                .enumerate()
                .filter(|&(_, &value)| value != 0)
                .map(|(item, _)| item)
                .collect::<Vec<Item>>()
        });
        Self::build_with(rows, options)
    }

    pub fn num_transactions(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Transactions as sorted, deduplicated item lists, indexed by tid.
    pub fn row_view(&self) -> &[Vec<Item>] {
        &self.rows
    }

    pub fn row(&self, tid: usize) -> &[Item] {
        &self.rows[tid]
    }

    pub fn column_view(&self) -> Result<&ColumnView> {
        self.columns.as_ref().ok_or(MiningError::ColumnViewUnavailable)
    }

    pub fn item_support(&self, item: Item) -> usize {
        self.item_supports.get(&item).copied().unwrap_or(0)
    }

    /// Distinct items in ascending order.
    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.item_supports.keys().copied()
    }

    pub fn num_items(&self) -> usize {
        self.item_supports.len()
    }

    /// Items reaching `min_count` with their global support, ascending by item.
    pub fn frequent_items(&self, min_count: usize) -> Vec<(Item, usize)> {
        self.item_supports
            .iter()
            .filter(|&(_, &count)| count >= min_count)
            .map(|(&item, &count)| (item, count))
            .collect()
    }
}

/// Incremental construction of a [`TransactionStore`] from transaction chunks.
#[derive(Debug)]
pub struct StoreBuilder {
    options: StoreOptions,
    rows: Vec<Vec<Item>>,
    columns: ColumnView,
    item_supports: BTreeMap<Item, usize>,
}

impl StoreBuilder {
    pub fn new(options: StoreOptions) -> Self {
        Self {
            options,
            rows: Vec::new(),
            columns: BTreeMap::new(),
            item_supports: BTreeMap::new(),
        }
    }

    pub fn num_transactions(&self) -> usize {
        self.rows.len()
    }

    /// Appends a chunk of transactions; tids continue from the previous chunk.
    pub fn extend<I, T>(&mut self, chunk: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: IntoIterator<Item = Item>,
    {
        for transaction in chunk {
            let row = normalize(transaction);
            if row.is_empty() && self.options.require_non_empty {
                return Err(MiningError::InvalidDatabase {
                    transaction: self.rows.len(),
                });
            }
            self.push_row(row);
        }
        Ok(())
    }

    fn extend_rows<I, T>(&mut self, chunk: I)
    where
        I: IntoIterator<Item = T>,
        T: IntoIterator<Item = Item>,
    {
        for transaction in chunk {
            self.push_row(normalize(transaction));
        }
    }

    fn push_row(&mut self, row: Vec<Item>) {
        let tid = self.rows.len();
        for &item in &row {
            *self.item_supports.entry(item).or_insert(0) += 1;
            if self.options.build_columns {
                self.columns.entry(item).or_default().push(tid);
            }
        }
        self.rows.push(row);
    }

    pub fn finish(self) -> TransactionStore {
        self.store()
    }

    fn store(self) -> TransactionStore {
        TransactionStore {
            rows: self.rows,
            columns: self.options.build_columns.then_some(self.columns),
            item_supports: self.item_supports,
        }
    }
}

fn normalize<T: IntoIterator<Item = Item>>(transaction: T) -> Vec<Item> {
    let mut row: Vec<Item> = transaction.into_iter().collect();
    row.sort_unstable();
    row.dedup();
    row
}
