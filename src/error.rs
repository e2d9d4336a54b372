use thiserror::Error;

/// Errors raised while loading a database or configuring a mining run
#[derive(Error, Debug)]
pub enum MiningError {
    #[error("Invalid minimum support ratio {0}: must lie in [0, 1]")]
    InvalidRatio(f64),

    #[error("Transaction {transaction} is empty")]
    InvalidDatabase { transaction: usize },

    #[error("Column view was not built for this store")]
    ColumnViewUnavailable,

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Malformed token {token:?} on line {line}")]
    Parse { line: usize, token: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MiningError>;
