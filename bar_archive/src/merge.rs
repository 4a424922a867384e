//! Incremental merge of freshly fetched bars into a stored dataset.
//!
//! The merge is a pure function over values already in memory: no I/O, no
//! partial application. Conflicts on a trading date resolve in favor of the
//! incoming batch, because the newer fetch may carry a corrected bar for a
//! date that was first fetched while the market was still open or settling.
//! Incoming-wins plus the keyed union makes the operation idempotent:
//! merging the same batch twice yields the dataset merging it once does,
//! which is what makes retries after a failed write safe.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use market_data_feed::models::raw_bar::RawBar;
use thiserror::Error;

use crate::model::{Bar, Dataset, DatasetIntegrityError, ParseError};

/// A merge that could not be performed, or that produced an invalid result.
#[derive(Debug, Error)]
pub enum MergeError {
    /// A record in the incoming batch failed validation. The whole batch is
    /// rejected; nothing built from a partially-validated batch is returned.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Incoming data disagrees with the dataset's symbol. Data is never
    /// merged across symbols.
    #[error("incoming batch is for {incoming}, dataset holds {existing}")]
    SymbolMismatch { existing: String, incoming: String },

    /// The merged result failed the dataset invariants. This indicates a
    /// defect in the engine itself and is never silently corrected.
    #[error("post-merge invariant violated: {source}")]
    InvariantViolation { source: DatasetIntegrityError },
}

/// A successful merge: the new dataset plus row accounting for the report.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub dataset: Dataset,
    /// Rows in the dataset before the merge.
    pub rows_before: usize,
    /// Dates present only in the incoming batch.
    pub rows_added: usize,
    /// Dates where an incoming bar replaced a stored one.
    pub rows_overwritten: usize,
}

/// Merges an incoming batch into an existing dataset.
///
/// Order of the incoming batch does not matter. Steps: validate every raw
/// record (one bad record fails the batch), check the symbol, take the keyed
/// union by date with incoming wins, and re-check the dataset invariants on
/// the result.
pub fn merge(existing: &Dataset, incoming: &[RawBar]) -> Result<MergeOutcome, MergeError> {
    let validated: Vec<Bar> = incoming
        .iter()
        .map(Bar::from_raw)
        .collect::<Result<_, _>>()?;

    for bar in &validated {
        if bar.symbol != existing.symbol() {
            return Err(MergeError::SymbolMismatch {
                existing: existing.symbol().to_string(),
                incoming: bar.symbol.clone(),
            });
        }
    }

    let existing_dates: BTreeSet<NaiveDate> =
        existing.bars().iter().map(|bar| bar.date).collect();

    let mut union: BTreeMap<NaiveDate, Bar> = existing
        .bars()
        .iter()
        .map(|bar| (bar.date, bar.clone()))
        .collect();

    let mut incoming_dates = BTreeSet::new();
    for bar in validated {
        // Within the batch itself, the last record for a date wins.
        incoming_dates.insert(bar.date);
        union.insert(bar.date, bar);
    }

    let rows_before = existing.len();
    let rows_overwritten = incoming_dates.intersection(&existing_dates).count();
    let rows_added = union.len() - rows_before;

    let merged = Dataset::new(existing.symbol().to_string(), union.into_values().collect())
        .map_err(|source| MergeError::InvariantViolation { source })?;

    Ok(MergeOutcome {
        dataset: merged,
        rows_before,
        rows_added,
        rows_overwritten,
    })
}
