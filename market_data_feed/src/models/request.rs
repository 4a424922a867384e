use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Parameters for requesting daily bars for a single symbol.
///
/// The archive processes one symbol at a time, so unlike multi-symbol batch
/// APIs this carries exactly one ticker. Both bounds are calendar dates;
/// providers should return bars for trading days in `[start, end]`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetchRequest {
    /// Ticker symbol to request (e.g., `"AAPL"`).
    pub symbol: String,
    /// First trading day of the window (inclusive).
    pub start: NaiveDate,
    /// Last trading day of the window (inclusive).
    pub end: NaiveDate,
}
