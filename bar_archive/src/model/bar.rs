//! Validated daily bar record.
//!
//! [`Bar`] is the only shape of price data the rest of the engine touches.
//! The single way in is [`Bar::from_raw`], which checks schema shape and
//! types. Price *relationships* (`low <= open,close <= high`) are not
//! checked; upstream data is trusted for those.

use chrono::NaiveDate;
use market_data_feed::models::raw_bar::RawBar;
use thiserror::Error;

/// Calendar-date format used everywhere: wire input, persisted CSV, logs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One trading day's OHLCV summary for one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Uppercase ticker symbol.
    pub symbol: String,
    /// Exchange-local trading day.
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// A raw record does not conform to the bar schema.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("symbol is empty")]
    EmptySymbol,

    #[error("unparsable date `{value}`: expected YYYY-MM-DD")]
    Date { value: String },

    #[error("price field `{field}` must be a positive finite number, got {value}")]
    Price { field: &'static str, value: f64 },

    #[error("volume must be a non-negative whole number, got {value}")]
    Volume { value: f64 },
}

impl Bar {
    /// Validates a raw fetched record into a [`Bar`].
    ///
    /// Symbols are matched case-insensitively on input and normalized to
    /// uppercase here. No side effects; a failed parse leaves nothing behind.
    pub fn from_raw(raw: &RawBar) -> Result<Self, ParseError> {
        let symbol = normalize_symbol(&raw.symbol)?;
        let date = NaiveDate::parse_from_str(raw.date.trim(), DATE_FORMAT)
            .map_err(|_| ParseError::Date {
                value: raw.date.clone(),
            })?;

        Ok(Self {
            symbol,
            date,
            open: check_price("open", raw.open)?,
            high: check_price("high", raw.high)?,
            low: check_price("low", raw.low)?,
            close: check_price("close", raw.close)?,
            volume: check_volume(raw.volume)?,
        })
    }
}

/// Trims and uppercases a ticker symbol, rejecting empty input.
pub(crate) fn normalize_symbol(symbol: &str) -> Result<String, ParseError> {
    let normalized = symbol.trim().to_uppercase();
    if normalized.is_empty() {
        return Err(ParseError::EmptySymbol);
    }
    Ok(normalized)
}

/// Prices must be positive and finite.
pub(crate) fn check_price(field: &'static str, value: f64) -> Result<f64, ParseError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ParseError::Price { field, value });
    }
    Ok(value)
}

/// Volume must be a non-negative whole number; providers report it as a float.
pub(crate) fn check_volume(value: f64) -> Result<u64, ParseError> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return Err(ParseError::Volume { value });
    }
    Ok(value as u64)
}
