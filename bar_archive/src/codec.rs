//! Persisted dataset encoding.
//!
//! One CSV artifact per symbol: a fixed header row
//! (`date,open,high,low,close,volume`), then one row per bar, ascending by
//! date, prices with four decimal places. Other tooling reads these files,
//! so the layout is a bit-exact contract.
//!
//! Decoding is fail-closed: anything that does not parse into a dataset
//! satisfying the invariants (wrong columns, duplicate dates, out-of-order
//! rows) is a [`CorruptDataError`]. The codec never repairs a stored
//! artifact; the orchestrator decides what to do with a corrupt one.

use std::fmt::Write as _;

use thiserror::Error;

use crate::{
    model::{Bar, DATE_FORMAT, Dataset, DatasetIntegrityError, ParseError},
    store::{ObjectStore, StoreError},
};

/// Fixed header row of every persisted artifact.
pub const HEADER: &str = "date,open,high,low,close,volume";

const COLUMNS: usize = 6;

/// The persisted dataset does not decode into a well-formed dataset.
#[derive(Debug, Error)]
pub enum CorruptDataError {
    #[error("artifact is not valid UTF-8")]
    NotUtf8,

    #[error("bad header: expected `{HEADER}`, got `{found}`")]
    Header { found: String },

    #[error("line {line}: expected {COLUMNS} columns, got {found}")]
    ColumnCount { line: usize, found: usize },

    #[error("line {line}: field `{field}` is not numeric: `{value}`")]
    Numeric {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: {source}")]
    Row { line: usize, source: ParseError },

    #[error(transparent)]
    Integrity(#[from] DatasetIntegrityError),
}

/// Errors from reading and decoding a stored dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Corrupt(#[from] CorruptDataError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid symbol: {source}")]
    Symbol { source: ParseError },
}

/// Store location for a symbol's artifact.
pub fn location(symbol: &str) -> String {
    format!("{symbol}.csv")
}

/// Serializes a dataset to the persisted CSV layout.
pub fn encode(dataset: &Dataset) -> Vec<u8> {
    let mut out = String::with_capacity(HEADER.len() + 1 + dataset.len() * 48);
    out.push_str(HEADER);
    out.push('\n');
    for bar in dataset.bars() {
        // Four decimal places for prices, matching the artifact contract.
        writeln!(
            out,
            "{},{:.4},{:.4},{:.4},{:.4},{}",
            bar.date.format(DATE_FORMAT),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume
        )
        .expect("writing to a String cannot fail");
    }
    out.into_bytes()
}

/// Parses a stored artifact into a dataset for `symbol`.
///
/// The symbol is not part of the encoding; it comes from the artifact's
/// location and is stamped onto every decoded bar.
pub fn decode(symbol: &str, bytes: &[u8]) -> Result<Dataset, CorruptDataError> {
    let text = std::str::from_utf8(bytes).map_err(|_| CorruptDataError::NotUtf8)?;
    let mut lines = text.lines();

    let header = lines.next().unwrap_or_default();
    if header != HEADER {
        return Err(CorruptDataError::Header {
            found: header.to_string(),
        });
    }

    let mut bars = Vec::new();
    for (idx, row) in lines.enumerate() {
        let line = idx + 2; // 1-based, after the header
        bars.push(decode_row(symbol, line, row)?);
    }

    Ok(Dataset::new(symbol.to_string(), bars)?)
}

fn decode_row(symbol: &str, line: usize, row: &str) -> Result<Bar, CorruptDataError> {
    let fields: Vec<&str> = row.split(',').collect();
    if fields.len() != COLUMNS {
        return Err(CorruptDataError::ColumnCount {
            line,
            found: fields.len(),
        });
    }

    let date = chrono::NaiveDate::parse_from_str(fields[0], DATE_FORMAT).map_err(|_| {
        CorruptDataError::Row {
            line,
            source: ParseError::Date {
                value: fields[0].to_string(),
            },
        }
    })?;

    let price = |field: &'static str, value: &str| -> Result<f64, CorruptDataError> {
        let parsed: f64 = value.parse().map_err(|_| CorruptDataError::Numeric {
            line,
            field,
            value: value.to_string(),
        })?;
        crate::model::check_price(field, parsed)
            .map_err(|source| CorruptDataError::Row { line, source })
    };

    let volume: u64 = fields[5].parse().map_err(|_| CorruptDataError::Numeric {
        line,
        field: "volume",
        value: fields[5].to_string(),
    })?;

    Ok(Bar {
        symbol: symbol.to_string(),
        date,
        open: price("open", fields[1])?,
        high: price("high", fields[2])?,
        low: price("low", fields[3])?,
        close: price("close", fields[4])?,
        volume,
    })
}

/// Reads and decodes the artifact for `symbol`, mapping a missing object to
/// an empty dataset. First runs for a symbol are not an error.
pub async fn load(store: &dyn ObjectStore, symbol: &str) -> Result<Dataset, LoadError> {
    match store.read(&location(symbol)).await? {
        Some(bytes) => Ok(decode(symbol, &bytes)?),
        None => Dataset::empty(symbol).map_err(|source| LoadError::Symbol { source }),
    }
}

/// Encodes and writes the full reconciled dataset for its symbol.
///
/// Callers only invoke this with a fully merged, fully validated dataset;
/// atomicity of the replacement is the store's responsibility.
pub async fn save(store: &dyn ObjectStore, dataset: &Dataset) -> Result<(), StoreError> {
    store
        .write(&location(dataset.symbol()), &encode(dataset))
        .await
}
