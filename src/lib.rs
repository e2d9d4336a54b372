//! Frequent and closed itemset mining.
//!
//! One depth-first search engine, several ways of counting support:
//! projected row databases, tid-set intersection, diffsets, conditional
//! prefix trees and node lists over a preorder/postorder-numbered tree.
//!
//! ```
//! use itemset_miner::{mine, Strategy};
//!
//! let database = vec![vec![1, 2, 3], vec![1, 2, 4], vec![1, 2], vec![1, 3], vec![2, 3]];
//! let result = mine(database, 0.4, false, Strategy::Vertical).unwrap();
//! assert_eq!(result.support_of(&[1, 2]), Some(3));
//! assert_eq!(result.len(), 6);
//! ```

pub mod closure;
pub mod config;
pub mod db;
pub mod error;
pub mod fp;
pub mod observer;
pub mod search;
pub mod storage;
pub mod support;

/// Item identifier
pub type Item = usize;

pub use closure::{filter_closed_global, ClosureChecker};
pub use config::{MiningConfig, Strategy};
pub use db::{read_transactions, StoreOptions, TidSet, TransactionStore};
pub use error::{MiningError, Result};
pub use observer::{MiningObserver, MiningStats, NoopObserver};
pub use search::{mine, mine_observed, mine_with};
pub use storage::{FrequentItemsets, FrequentLevel};
pub use support::SupportCounter;

#[cfg(feature = "python")]
mod python {
    use crate::{MiningConfig, StoreOptions, Strategy, TransactionStore};
    use numpy::ndarray::Array2;
    use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray2};
    use pyo3::exceptions::{PyRuntimeError, PyValueError};
    use pyo3::prelude::*;

    type LevelArrays<'py> = (Bound<'py, PyArray2<usize>>, Bound<'py, PyArray1<usize>>);

    fn to_py_err(err: crate::MiningError) -> PyErr {
        match err {
            crate::MiningError::InvalidRatio(_)
            | crate::MiningError::InvalidDatabase { .. }
            | crate::MiningError::UnknownStrategy(_)
            | crate::MiningError::Parse { .. } => PyValueError::new_err(err.to_string()),
            _ => PyRuntimeError::new_err(err.to_string()),
        }
    }

    fn config_for(min_support: f64, closed_only: bool, strategy: &str) -> PyResult<MiningConfig> {
        let strategy: Strategy = strategy.parse().map_err(to_py_err)?;
        let config = MiningConfig::new(min_support)
            .with_closed_only(closed_only)
            .with_strategy(strategy)
            .with_parallel(true);
        config.validate().map_err(to_py_err)?;
        Ok(config)
    }

    fn run<'py>(
        py: Python<'py>,
        store: TransactionStore,
        config: &MiningConfig,
    ) -> PyResult<Vec<LevelArrays<'py>>> {
        let frequent = py
            .allow_threads(|| crate::mine_with(&store, config))
            .map_err(to_py_err)?;

        let mut result = Vec::new();
        for level in frequent.levels() {
            let itemset_size = level.itemset_size;
            let num_itemsets = level.len();
            let mut data = vec![0usize; num_itemsets * itemset_size];
            let mut supports = Vec::with_capacity(num_itemsets);

            for (i, (itemset, support)) in level.iter().enumerate() {
                data[i * itemset_size..(i + 1) * itemset_size].copy_from_slice(itemset);
                supports.push(support);
            }

            let array = Array2::from_shape_vec((num_itemsets, itemset_size), data)
                .map_err(|_| PyValueError::new_err("Failed to create array"))?;

            result.push((array.into_pyarray(py), supports.into_pyarray(py)));
        }

        Ok(result)
    }

    /// Mines a list of transactions; one `(itemsets, supports)` pair per size.
    #[pyfunction]
    #[pyo3(signature = (transactions, min_support, closed_only = false, strategy = "vertical"))]
    fn mine<'py>(
        py: Python<'py>,
        transactions: Vec<Vec<usize>>,
        min_support: f64,
        closed_only: bool,
        strategy: &str,
    ) -> PyResult<Vec<LevelArrays<'py>>> {
        let config = config_for(min_support, closed_only, strategy)?;
        let options = StoreOptions {
            build_columns: config.strategy.needs_columns(),
            ..StoreOptions::default()
        };
        let store = TransactionStore::build_with(transactions, &options).map_err(to_py_err)?;
        run(py, store, &config)
    }

    /// Mines a dense 0/1 matrix whose columns are items.
    #[pyfunction]
    #[pyo3(signature = (transactions, min_support, closed_only = false, strategy = "vertical"))]
    fn mine_dense<'py>(
        py: Python<'py>,
        transactions: PyReadonlyArray2<'py, i32>,
        min_support: f64,
        closed_only: bool,
        strategy: &str,
    ) -> PyResult<Vec<LevelArrays<'py>>> {
        let config = config_for(min_support, closed_only, strategy)?;
        let options = StoreOptions {
            build_columns: config.strategy.needs_columns(),
            ..StoreOptions::default()
        };
        let store =
            TransactionStore::from_matrix(transactions.as_array(), &options).map_err(to_py_err)?;
        run(py, store, &config)
    }

    #[pymodule]
    fn itemset_miner(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(mine, m)?)?;
        m.add_function(wrap_pyfunction!(mine_dense, m)?)?;
        Ok(())
    }
}
