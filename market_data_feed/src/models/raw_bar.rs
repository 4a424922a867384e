//! Wire-shaped daily bar record, prior to validation.

/// One fetched daily bar, exactly as the provider reported it.
///
/// This is deliberately loose: the date is still a string and the numeric
/// fields are unchecked. Consumers are expected to validate every record
/// before letting it anywhere near persisted data.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBar {
    /// Ticker symbol as reported by the provider.
    pub symbol: String,
    /// Exchange-local trading day, formatted `YYYY-MM-DD`.
    pub date: String,
    /// Opening price.
    pub open: f64,
    /// Highest price of the day.
    pub high: f64,
    /// Lowest price of the day.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Shares traded. Providers report this as a float.
    pub volume: f64,
}
