//! Invariant-holding collection of one symbol's bars.

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::bar::{Bar, ParseError, normalize_symbol};

/// The full ordered history of bars for exactly one symbol.
///
/// Construction is the only place invariants are checked, so holding a
/// `Dataset` means: at most one bar per date, dates strictly ascending, and
/// every bar carrying the dataset's symbol. Calendar gaps (weekends,
/// holidays, provider outages) are legal.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    symbol: String,
    bars: Vec<Bar>,
}

/// A bar collection violates the dataset invariants.
#[derive(Debug, Error)]
pub enum DatasetIntegrityError {
    #[error("duplicate bar for {date}")]
    DuplicateDate { date: NaiveDate },

    #[error("bars out of order: {prev} followed by {next}")]
    OutOfOrder { prev: NaiveDate, next: NaiveDate },

    #[error("bar for symbol {found} in dataset for {expected}")]
    ForeignSymbol { expected: String, found: String },
}

impl Dataset {
    /// Creates an empty dataset for a symbol (first run for that symbol).
    pub fn empty(symbol: &str) -> Result<Self, ParseError> {
        Ok(Self {
            symbol: normalize_symbol(symbol)?,
            bars: Vec::new(),
        })
    }

    /// Builds a dataset from already-validated bars, checking the ordering,
    /// uniqueness, and homogeneity invariants.
    pub fn new(symbol: String, bars: Vec<Bar>) -> Result<Self, DatasetIntegrityError> {
        for bar in &bars {
            if bar.symbol != symbol {
                return Err(DatasetIntegrityError::ForeignSymbol {
                    expected: symbol,
                    found: bar.symbol.clone(),
                });
            }
        }
        for pair in bars.windows(2) {
            if pair[0].date == pair[1].date {
                return Err(DatasetIntegrityError::DuplicateDate { date: pair[0].date });
            }
            if pair[0].date > pair[1].date {
                return Err(DatasetIntegrityError::OutOfOrder {
                    prev: pair[0].date,
                    next: pair[1].date,
                });
            }
        }
        Ok(Self { symbol, bars })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
