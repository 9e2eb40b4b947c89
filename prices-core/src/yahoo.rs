//! Yahoo Finance quote provider.
//!
//! Historical closes come from the v8 chart API; yield fields come from the
//! v10 quoteSummary API (`summaryDetail` module). Yahoo Finance has no
//! official API and is subject to unannounced format changes, so both
//! response shapes are parsed defensively into `ResponseFormatChanged`
//! errors rather than panics.

use crate::provider::{PriceRow, QuoteError, QuoteProvider, TickerInfo};
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

// ── v8 chart API response ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    close: Vec<Option<f64>>,
}

// ── v10 quoteSummary response ────────────────────────────────────────
//
// Numeric fields arrive as {"raw": 0.005, "fmt": "0.50%"} wrappers, or as
// empty objects {} when no data is available.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResponse {
    quote_summary: QuoteSummary,
}

#[derive(Debug, Deserialize)]
struct QuoteSummary {
    result: Option<Vec<QuoteSummaryResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResult {
    summary_detail: Option<SummaryDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetail {
    #[serde(rename = "yield")]
    fund_yield: Option<RawValue>,
    dividend_yield: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

/// Yahoo Finance quote provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooProvider {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    /// Build the chart API URL for a symbol and date range.
    fn chart_url(symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        let start_ts = start.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();
        let end_ts = end.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{symbol}\
             ?period1={start_ts}&period2={end_ts}&interval=1d"
        )
    }

    /// Build the quoteSummary URL for a symbol.
    fn summary_url(symbol: &str) -> String {
        format!(
            "https://query2.finance.yahoo.com/v10/finance/quoteSummary/{symbol}\
             ?modules=summaryDetail"
        )
    }

    fn get(&self, url: &str, symbol: &str) -> Result<reqwest::blocking::Response, QuoteError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| QuoteError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(QuoteError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        if !status.is_success() {
            return Err(QuoteError::Other(format!("HTTP {status} for {symbol}")));
        }

        Ok(resp)
    }

    /// Parse the chart API response into price rows.
    ///
    /// An empty range (no timestamps, or a result carrying no data) parses
    /// to an empty vec; rows whose close is null (non-trading days) are
    /// skipped.
    fn parse_chart(symbol: &str, resp: ChartResponse) -> Result<Vec<PriceRow>, QuoteError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    QuoteError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    QuoteError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
                }
            } else {
                QuoteError::ResponseFormatChanged("empty result with no error".into())
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| QuoteError::ResponseFormatChanged("result array is empty".into()))?;

        let Some(timestamps) = data.timestamp else {
            return Ok(Vec::new());
        };

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| QuoteError::ResponseFormatChanged("no quote data".into()))?;

        let mut rows = Vec::with_capacity(timestamps.len());

        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    QuoteError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            let Some(close) = quote.close.get(i).copied().flatten() else {
                continue;
            };

            rows.push(PriceRow { date, close });
        }

        Ok(rows)
    }

    /// Parse the quoteSummary response into the yield fields.
    fn parse_summary(symbol: &str, resp: QuoteSummaryResponse) -> Result<TickerInfo, QuoteError> {
        let result = resp.quote_summary.result.ok_or_else(|| {
            if let Some(err) = resp.quote_summary.error {
                if err.code == "Not Found" {
                    QuoteError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    QuoteError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
                }
            } else {
                QuoteError::ResponseFormatChanged("empty result with no error".into())
            }
        })?;

        let detail = result
            .into_iter()
            .next()
            .ok_or_else(|| QuoteError::ResponseFormatChanged("result array is empty".into()))?
            .summary_detail;

        // A symbol without a summaryDetail module simply has no yield data.
        let Some(detail) = detail else {
            return Ok(TickerInfo::default());
        };

        Ok(TickerInfo {
            fund_yield: detail.fund_yield.and_then(|v| v.raw),
            dividend_yield: detail.dividend_yield.and_then(|v| v.raw),
        })
    }
}

impl QuoteProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceRow>, QuoteError> {
        let url = Self::chart_url(symbol, start, end);
        let chart: ChartResponse = self.get(&url, symbol)?.json().map_err(|e| {
            QuoteError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })?;
        Self::parse_chart(symbol, chart)
    }

    fn info(&self, symbol: &str) -> Result<TickerInfo, QuoteError> {
        let url = Self::summary_url(symbol);
        let summary: QuoteSummaryResponse = self.get(&url, symbol)?.json().map_err(|e| {
            QuoteError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })?;
        Self::parse_summary(symbol, summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn chart_response_parses_to_rows() {
        // 2024-01-02 and 2024-01-03, UTC midnight.
        let json = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1704153600, 1704240000],
                    "indicators": {
                        "quote": [{"close": [472.65, 468.79]}]
                    }
                }],
                "error": null
            }
        }"#;
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        let rows = YahooProvider::parse_chart("SPY", resp).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date.year(), 2024);
        assert_eq!(rows[0].date.month(), 1);
        assert_eq!(rows[0].date.day(), 2);
        assert_eq!(rows[0].close, 472.65);
        assert_eq!(rows[1].close, 468.79);
    }

    #[test]
    fn chart_rows_with_null_close_are_skipped() {
        let json = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1704153600, 1704240000, 1704326400],
                    "indicators": {
                        "quote": [{"close": [472.65, null, 476.12]}]
                    }
                }],
                "error": null
            }
        }"#;
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        let rows = YahooProvider::parse_chart("SPY", resp).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].close, 472.65);
        assert_eq!(rows[1].close, 476.12);
    }

    #[test]
    fn chart_with_no_timestamps_is_empty_not_an_error() {
        let json = r#"{
            "chart": {
                "result": [{"indicators": {"quote": [{"close": []}]}}],
                "error": null
            }
        }"#;
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        let rows = YahooProvider::parse_chart("SPY", resp).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn chart_not_found_error_maps_to_symbol_not_found() {
        let json = r#"{
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found"}
            }
        }"#;
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        match YahooProvider::parse_chart("NOSUCH", resp) {
            Err(QuoteError::SymbolNotFound { symbol }) => assert_eq!(symbol, "NOSUCH"),
            other => panic!("expected SymbolNotFound, got: {other:?}"),
        }
    }

    #[test]
    fn summary_with_fund_yield() {
        let json = r#"{
            "quoteSummary": {
                "result": [{
                    "summaryDetail": {
                        "yield": {"raw": 0.03, "fmt": "3.00%"},
                        "dividendYield": {}
                    }
                }],
                "error": null
            }
        }"#;
        let resp: QuoteSummaryResponse = serde_json::from_str(json).unwrap();
        let info = YahooProvider::parse_summary("VTI", resp).unwrap();
        assert_eq!(info.fund_yield, Some(0.03));
        assert_eq!(info.dividend_yield, None);
    }

    #[test]
    fn summary_with_dividend_yield_only() {
        let json = r#"{
            "quoteSummary": {
                "result": [{
                    "summaryDetail": {
                        "dividendYield": {"raw": 3.0, "fmt": "3.00%"}
                    }
                }],
                "error": null
            }
        }"#;
        let resp: QuoteSummaryResponse = serde_json::from_str(json).unwrap();
        let info = YahooProvider::parse_summary("KO", resp).unwrap();
        assert_eq!(info.fund_yield, None);
        assert_eq!(info.dividend_yield, Some(3.0));
    }

    #[test]
    fn summary_with_empty_detail_has_no_yield_fields() {
        // Yahoo sends empty objects {} for fields with no data.
        let json = r#"{
            "quoteSummary": {
                "result": [{"summaryDetail": {"yield": {}, "dividendYield": {}}}],
                "error": null
            }
        }"#;
        let resp: QuoteSummaryResponse = serde_json::from_str(json).unwrap();
        let info = YahooProvider::parse_summary("GOOG", resp).unwrap();
        assert_eq!(info, TickerInfo::default());
    }

    #[test]
    fn summary_not_found_error_maps_to_symbol_not_found() {
        let json = r#"{
            "quoteSummary": {
                "result": null,
                "error": {"code": "Not Found", "description": "Quote not found"}
            }
        }"#;
        let resp: QuoteSummaryResponse = serde_json::from_str(json).unwrap();
        match YahooProvider::parse_summary("NOSUCH", resp) {
            Err(QuoteError::SymbolNotFound { symbol }) => assert_eq!(symbol, "NOSUCH"),
            other => panic!("expected SymbolNotFound, got: {other:?}"),
        }
    }

    #[test]
    fn chart_url_uses_day_resolution_bounds() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let url = YahooProvider::chart_url("SPY", start, end);
        assert!(url.contains("/v8/finance/chart/SPY"));
        assert!(url.contains("period1=1704067200"));
        assert!(url.contains("period2=1735689600"));
        assert!(url.contains("interval=1d"));
    }
}
