// Transaction database: storage, tid-sets and text loading

pub mod parse;
pub mod store;
pub mod tidset;

pub use parse::{parse_transactions, read_transactions};
pub use store::{ColumnView, StoreBuilder, StoreOptions, TransactionStore};
pub use tidset::TidSet;
