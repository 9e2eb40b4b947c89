//! Report layer: turns provider rows into the CLI's output lines.
//!
//! Output contract:
//! - `run_prices` prints one `YYYY-MM-DD <close>` line per row, then a
//!   literal `DONE` line — but only when at least one row came back. Zero
//!   rows print nothing at all, terminator included.
//! - `run_yield` prints the fund yield ratio verbatim, or the percent
//!   dividend yield divided by 100, or the literal `None`.

use crate::dates::{self, DateError};
use crate::provider::{QuoteError, QuoteProvider};
use chrono::NaiveDate;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Date(#[from] DateError),

    #[error("invalid date: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetch and print daily closes for `symbol` over the year starting at
/// `start_date`. The window is `[start_date, next_year(start_date))`, so it
/// runs through the end of the start date's calendar year.
pub fn run_prices<W: Write>(
    provider: &dyn QuoteProvider,
    start_date: &str,
    symbol: &str,
    out: &mut W,
) -> Result<(), ReportError> {
    let end_date = dates::next_year(start_date)?;

    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d")?;
    let end = NaiveDate::parse_from_str(&end_date, "%Y-%m-%d")?;

    let rows = provider.history(symbol, start, end)?;

    for row in &rows {
        writeln!(out, "{} {}", row.date.format("%Y-%m-%d"), row.close)?;
    }
    if !rows.is_empty() {
        writeln!(out, "DONE")?;
    }

    Ok(())
}

/// Fetch and print the yield figure for `symbol`.
///
/// The fund `yield` field wins when present. Otherwise `dividendYield`,
/// which the provider reports in percent, is scaled down to a ratio. When
/// neither field is present the literal `None` is printed.
pub fn run_yield<W: Write>(
    provider: &dyn QuoteProvider,
    symbol: &str,
    out: &mut W,
) -> Result<(), ReportError> {
    let info = provider.info(symbol)?;

    match (info.fund_yield, info.dividend_yield) {
        (Some(y), _) => writeln!(out, "{y}")?,
        (None, Some(dy)) => writeln!(out, "{}", dy / 100.0)?,
        (None, None) => writeln!(out, "None")?,
    }

    Ok(())
}
