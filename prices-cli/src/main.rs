//! Prices CLI — historical close prices and dividend yields from Yahoo Finance.
//!
//! Commands:
//! - `prices <start_date> <symbol>` — daily closes for the year starting at
//!   `start_date`, one `YYYY-MM-DD <close>` line per trading day, then `DONE`
//! - `yield <symbol>` — the fund yield ratio, the dividend yield scaled to a
//!   ratio, or `None`
//!
//! Anything the parser does not recognize prints the usage text and exits
//! normally; provider failures propagate as error reports on stderr.

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use prices_core::{run_prices, run_yield, YahooProvider};
use std::io::{self, Write};

const USAGE: &str = "usage: prices prices date symbol1
usage: prices yield symbol1
date format is YYYY-MM-DD
";

#[derive(Parser)]
#[command(name = "prices", about = "Fetch close prices and dividend yields")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print daily closing prices for one year starting at the given date.
    Prices {
        /// Start date (YYYY-MM-DD).
        start_date: String,

        /// Ticker symbol (e.g. SPY).
        symbol: String,
    },
    /// Print the dividend yield for a symbol.
    Yield {
        /// Ticker symbol (e.g. KO).
        symbol: String,
    },
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::DisplayHelp || e.kind() == ErrorKind::DisplayVersion => {
            e.print()?;
            return Ok(());
        }
        Err(_) => {
            // Missing or unrecognized arguments get the usage text and a
            // normal exit, before any provider is constructed.
            print!("{USAGE}");
            return Ok(());
        }
    };

    let provider = YahooProvider::new();
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Prices { start_date, symbol } => {
            run_prices(&provider, &start_date, &symbol, &mut out)?
        }
        Commands::Yield { symbol } => run_yield(&provider, &symbol, &mut out)?,
    }

    out.flush()?;
    Ok(())
}
