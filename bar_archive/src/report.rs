//! Per-run outcome summary.
//!
//! One entry per configured symbol, in processing order. The report is what
//! the invoking harness gets back: row accounting on success, a failure kind
//! and message otherwise. It serializes to JSON for downstream logging and
//! alerting.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// Which stage of a symbol's reconciliation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The fetched batch contained a malformed record.
    Parse,
    /// The stored artifact did not decode into a valid dataset.
    CorruptData,
    /// Incoming data was for a different symbol than the dataset.
    SymbolMismatch,
    /// The market-data fetch itself failed.
    Fetch,
    /// The durable store failed to read or write.
    Store,
}

/// Outcome of one symbol's reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SymbolOutcome {
    Success {
        rows_before: usize,
        rows_added: usize,
        rows_overwritten: usize,
    },
    Failed {
        kind: FailureKind,
        message: String,
    },
}

/// Aggregate outcome of a full run across the configured symbol set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    outcomes: IndexMap<String, SymbolOutcome>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, symbol: &str, outcome: SymbolOutcome) {
        self.outcomes.insert(symbol.to_string(), outcome);
    }

    pub fn outcomes(&self) -> &IndexMap<String, SymbolOutcome> {
        &self.outcomes
    }

    /// Number of symbols that reconciled successfully.
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .values()
            .filter(|o| matches!(o, SymbolOutcome::Success { .. }))
            .count()
    }

    /// Number of symbols that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} succeeded, {} failed",
            self.succeeded(),
            self.failed()
        )?;
        for (symbol, outcome) in &self.outcomes {
            match outcome {
                SymbolOutcome::Success {
                    rows_before,
                    rows_added,
                    rows_overwritten,
                } => writeln!(
                    f,
                    "  {symbol}: ok ({rows_before} rows before, {rows_added} added, \
                     {rows_overwritten} overwritten)"
                )?,
                SymbolOutcome::Failed { kind, message } => {
                    writeln!(f, "  {symbol}: failed ({kind:?}): {message}")?
                }
            }
        }
        Ok(())
    }
}
