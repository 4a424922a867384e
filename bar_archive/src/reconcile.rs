//! Per-symbol reconciliation: read, fetch, merge, write.
//!
//! Symbols are processed sequentially; a failure in one symbol's data never
//! aborts the others (bulkhead isolation). The one exception is a post-merge
//! invariant violation, which signals a defect in the engine, not in the
//! data, and aborts the whole run.

use chrono::{Duration, NaiveDate, Utc};
use market_data_feed::{
    models::request::FetchRequest,
    providers::{BarFeed, FetchError},
};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    codec::{self, CorruptDataError, LoadError},
    config::ArchiveConfig,
    merge::{MergeError, merge},
    model::{DatasetIntegrityError, ParseError},
    report::{FailureKind, RunReport, SymbolOutcome},
    store::{ObjectStore, StoreError},
};

/// Calendar-date window each fetch covers, shared by every symbol in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    /// First day of the window (inclusive).
    pub start: NaiveDate,
    /// Last day of the window (inclusive).
    pub end: NaiveDate,
}

impl FetchWindow {
    /// Window ending today (UTC) and reaching `days` calendar days back.
    pub fn last_days(days: u32) -> Self {
        let end = Utc::now().date_naive();
        Self {
            start: end - Duration::days(i64::from(days)),
            end,
        }
    }
}

/// A failure that aborts the whole run rather than one symbol.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("merge for {symbol} violated dataset invariants: {source}")]
    Invariant {
        symbol: String,
        source: DatasetIntegrityError,
    },
}

// Per-symbol failure, folded into the run report.
#[derive(Debug, Error)]
enum SymbolError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Corrupt(#[from] CorruptDataError),

    #[error("incoming batch is for {incoming}, dataset holds {existing}")]
    SymbolMismatch { existing: String, incoming: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Invariant(DatasetIntegrityError),
}

impl SymbolError {
    fn kind(&self) -> FailureKind {
        match self {
            SymbolError::Parse(_) => FailureKind::Parse,
            SymbolError::Corrupt(_) => FailureKind::CorruptData,
            SymbolError::SymbolMismatch { .. } => FailureKind::SymbolMismatch,
            SymbolError::Fetch(_) => FailureKind::Fetch,
            SymbolError::Store(_) => FailureKind::Store,
            // Invariant failures never reach the report; run() rethrows them.
            SymbolError::Invariant(_) => FailureKind::Parse,
        }
    }
}

impl From<MergeError> for SymbolError {
    fn from(err: MergeError) -> Self {
        match err {
            MergeError::Parse(e) => SymbolError::Parse(e),
            MergeError::SymbolMismatch { existing, incoming } => {
                SymbolError::SymbolMismatch { existing, incoming }
            }
            MergeError::InvariantViolation { source } => SymbolError::Invariant(source),
        }
    }
}

impl From<LoadError> for SymbolError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Corrupt(e) => SymbolError::Corrupt(e),
            LoadError::Store(e) => SymbolError::Store(e),
            LoadError::Symbol { source } => SymbolError::Parse(source),
        }
    }
}

/// Drives one run over the configured symbol set.
pub struct Reconciler<F, S> {
    feed: F,
    store: S,
    config: ArchiveConfig,
}

impl<F: BarFeed, S: ObjectStore> Reconciler<F, S> {
    pub fn new(feed: F, store: S, config: ArchiveConfig) -> Self {
        Self {
            feed,
            store,
            config,
        }
    }

    /// Reconciles every configured symbol and returns the aggregate report.
    ///
    /// Per-symbol failures are recorded and the run continues; an invariant
    /// violation aborts immediately without writing that symbol's artifact.
    pub async fn run(&self, window: FetchWindow) -> Result<RunReport, ReconcileError> {
        let mut report = RunReport::new();

        for symbol in &self.config.symbols {
            match self.reconcile_symbol(symbol, window).await {
                Ok(outcome) => {
                    if let SymbolOutcome::Success {
                        rows_before,
                        rows_added,
                        rows_overwritten,
                    } = outcome
                    {
                        info!(%symbol, rows_before, rows_added, rows_overwritten, "reconciled");
                    }
                    report.record(symbol, outcome);
                }
                Err(SymbolError::Invariant(source)) => {
                    error!(%symbol, %source, "post-merge invariant violation, aborting run");
                    return Err(ReconcileError::Invariant {
                        symbol: symbol.clone(),
                        source,
                    });
                }
                Err(err) => {
                    warn!(%symbol, kind = ?err.kind(), %err, "symbol reconciliation failed");
                    report.record(
                        symbol,
                        SymbolOutcome::Failed {
                            kind: err.kind(),
                            message: err.to_string(),
                        },
                    );
                }
            }
        }

        Ok(report)
    }

    async fn reconcile_symbol(
        &self,
        symbol: &str,
        window: FetchWindow,
    ) -> Result<SymbolOutcome, SymbolError> {
        let existing = codec::load(&self.store, symbol).await?;

        let request = FetchRequest {
            symbol: symbol.to_string(),
            start: window.start,
            end: window.end,
        };
        let incoming = self.feed.fetch_daily(&request).await?;

        let outcome = merge(&existing, &incoming)?;

        // Nothing is persisted unless the merge produced a fully valid
        // dataset; a failure above leaves the stored artifact untouched.
        codec::save(&self.store, &outcome.dataset).await?;

        Ok(SymbolOutcome::Success {
            rows_before: outcome.rows_before,
            rows_added: outcome.rows_added,
            rows_overwritten: outcome.rows_overwritten,
        })
    }
}
