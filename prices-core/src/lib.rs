//! Prices Core — quote retrieval for the `prices` CLI.
//!
//! This crate contains everything below the argument parser:
//! - Date-window arithmetic for building a one-year query range
//! - The `QuoteProvider` trait and structured error types
//! - The Yahoo Finance provider (chart + quoteSummary APIs)
//! - The report layer that turns provider rows into output lines

pub mod dates;
pub mod provider;
pub mod report;
pub mod yahoo;

pub use provider::{PriceRow, QuoteError, QuoteProvider, TickerInfo};
pub use report::{run_prices, run_yield, ReportError};
pub use yahoo::YahooProvider;
