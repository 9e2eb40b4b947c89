//! Quote provider trait and structured error types.
//!
//! The `QuoteProvider` trait abstracts over the market-data source so the
//! report layer can be exercised against a mock in tests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single (date, closing price) row from a historical price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub close: f64,
}

/// Descriptive info for a symbol, reduced to the yield fields.
///
/// `fund_yield` is the provider's `yield` field, a ratio reported for funds.
/// `dividend_yield` is the `dividendYield` field, reported in percent; the
/// report layer divides it by 100 when falling back to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickerInfo {
    pub fund_yield: Option<f64>,
    pub dividend_yield: Option<f64>,
}

/// Structured error types for quote operations.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("provider error: {0}")]
    Other(String),
}

/// Trait for market-data providers.
///
/// Implementations handle the specifics of one source. Calls are blocking;
/// there is no retry, timeout handling beyond the HTTP client's own, or
/// caching at this layer.
pub trait QuoteProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Daily closing prices for a symbol over `[start, end)`, in
    /// chronological order. An empty vec means the provider had no data for
    /// the range; that is not an error.
    fn history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceRow>, QuoteError>;

    /// Descriptive info for a symbol, reduced to the yield fields.
    fn info(&self, symbol: &str) -> Result<TickerInfo, QuoteError>;
}
