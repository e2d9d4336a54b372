use crate::error::{MiningError, Result};
use crate::Item;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const COMMENT_PREFIXES: [char; 3] = ['#', '%', '@'];

/// Reads a whitespace-separated transaction file.
///
/// Blank lines and lines starting with `#`, `%` or `@` are skipped.
/// Duplicate items on a line collapse.
pub fn parse_transactions<R: BufRead>(reader: R) -> Result<Vec<Vec<Item>>> {
    let mut transactions = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIXES) {
            continue;
        }

        let mut transaction = trimmed
            .split_whitespace()
            .map(|token| parse_item(token, idx + 1))
            .collect::<Result<Vec<Item>>>()?;

        transaction.sort_unstable();
        transaction.dedup();
        transactions.push(transaction);
    }

    tracing::debug!(transactions = transactions.len(), "parsed transaction database");
    Ok(transactions)
}

/// Accepts plain decimal digits only, so `+5` is malformed.
fn parse_item(token: &str, line: usize) -> Result<Item> {
    let malformed = || MiningError::Parse {
        line,
        token: token.to_string(),
    };
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    token.parse::<Item>().map_err(|_| malformed())
}

pub fn read_transactions<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<Item>>> {
    let file = File::open(path)?;
    parse_transactions(BufReader::new(file))
}
