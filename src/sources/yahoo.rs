//! Yahoo Finance chart API client.
//!
//! Provides OHLC candles for stocks, ETFs, futures, FX pairs and crypto
//! through the unofficial chart endpoint (no API key).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{CandleSource, SourceError};
use crate::types::{Candle, CandleQuery, CandleSeries};

/// Exchange prefixes whose six-letter tickers are currency pairs.
const FX_EXCHANGES: &[&str] = &["OANDA", "FX", "FX_IDC"];

/// ISO codes of fiat currencies quoted against USD on Yahoo as `XXXUSD=X`.
const FIAT_CURRENCIES: &[&str] = &[
    "AUD", "BRL", "CAD", "CHF", "CNY", "DKK", "EUR", "GBP", "HKD", "INR", "JPY", "KRW", "MXN",
    "NOK", "NZD", "PLN", "SEK", "SGD", "TRY", "ZAR",
];

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    #[serde(default)]
    meta: Option<YahooMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooMeta {
    symbol: String,
    #[serde(default)]
    data_granularity: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
}

/// Normalize symbol for Yahoo Finance API.
/// Yahoo uses hyphens instead of dots for share classes (e.g., BRK-B not BRK.B)
fn normalize_yahoo_symbol(symbol: &str) -> String {
    symbol.to_uppercase().replace('.', "-")
}

fn is_currency_pair(s: &str) -> bool {
    s.len() == 6 && s.chars().all(|c| c.is_ascii_alphabetic())
}

/// Strip a USDT/USD quote currency, leaving a non-empty base.
fn crypto_base(s: &str) -> Option<&str> {
    s.strip_suffix("USDT")
        .or_else(|| s.strip_suffix("USD"))
        .filter(|base| !base.is_empty())
}

/// Rewrite a charting-platform ticker into Yahoo's format.
///
/// - `OANDA:EUR_USD`, `OANDA:EURUSD` -> `EURUSD=X`
/// - `BINANCE:BTCUSDT`, `COINBASE:ETHUSD`, `BTCUSDT`, `BTCUSD` -> `BTC-USD`, `ETH-USD`
/// - `EURUSD`, `COINBASE:GBPUSD` -> `EURUSD=X`, `GBPUSD=X` (fiat base)
/// - `NASDAQ:AAPL` -> `AAPL`, `brk.b` -> `BRK-B`
pub fn to_yahoo_symbol(raw: &str) -> String {
    let s = raw.trim().to_uppercase();

    let Some((exchange, ticker)) = s.split_once(':') else {
        return usd_quoted(&s).unwrap_or_else(|| normalize_yahoo_symbol(&s));
    };

    if let Some((base, quote)) = ticker.split_once('_') {
        if !base.is_empty() && !quote.is_empty() {
            return format!("{}{}=X", base, quote);
        }
    }

    if FX_EXCHANGES.contains(&exchange) && is_currency_pair(ticker) {
        return format!("{}=X", ticker);
    }

    usd_quoted(ticker).unwrap_or_else(|| normalize_yahoo_symbol(ticker))
}

/// Rewrite a USD/USDT-quoted pair: a fiat base is an FX pair, anything
/// else is a crypto coin.
fn usd_quoted(ticker: &str) -> Option<String> {
    let base = crypto_base(ticker)?;
    if FIAT_CURRENCIES.contains(&base) && ticker.len() == 6 {
        return Some(format!("{}=X", ticker));
    }
    if !base.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(format!("{}-USD", base))
}

/// Turn a chart payload into a candle series.
///
/// Rows with a missing, non-finite or non-positive price are skipped.
fn parse_chart(data: YahooChartResponse) -> Result<CandleSeries, SourceError> {
    // Check for API error
    if let Some(error) = data.chart.error {
        return Err(SourceError::Api {
            code: error.code,
            description: error.description,
        });
    }

    let result = data
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| SourceError::Malformed("no results in response".to_string()))?;

    if let Some(meta) = &result.meta {
        debug!(
            "Yahoo chart for {} ({})",
            meta.symbol,
            meta.data_granularity.as_deref().unwrap_or("unknown granularity")
        );
    }

    let timestamps = result
        .timestamp
        .ok_or_else(|| SourceError::Malformed("no timestamps in response".to_string()))?;

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| SourceError::Malformed("no quote data in response".to_string()))?;

    let column = |values: Option<Vec<Option<f64>>>, name: &str| {
        values.ok_or_else(|| SourceError::Malformed(format!("no {} prices in response", name)))
    };
    let opens = column(quote.open, "open")?;
    let highs = column(quote.high, "high")?;
    let lows = column(quote.low, "low")?;
    let closes = column(quote.close, "close")?;

    let price = |values: &[Option<f64>], i: usize| {
        values
            .get(i)
            .copied()
            .flatten()
            .filter(|v| v.is_finite() && *v > 0.0)
    };

    let mut series = CandleSeries::with_capacity(timestamps.len());
    for (i, &timestamp) in timestamps.iter().enumerate() {
        let (Some(open), Some(high), Some(low), Some(close)) = (
            price(opens.as_slice(), i),
            price(highs.as_slice(), i),
            price(lows.as_slice(), i),
            price(closes.as_slice(), i),
        ) else {
            continue;
        };

        series.push(Candle {
            timestamp,
            open,
            high,
            low,
            close,
        });
    }

    Ok(series)
}

/// Yahoo Finance API client.
pub struct YahooFinanceClient {
    client: Client,
    base_url: String,
}

impl YahooFinanceClient {
    /// Create a client against `base_url` (e.g. `https://query1.finance.yahoo.com`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch candles for an already rewritten Yahoo ticker.
    ///
    /// Arguments:
    /// - symbol: Yahoo ticker (e.g., "AAPL", "BTC-USD", "EURUSD=X")
    /// - range: Time range ("5d", "1mo", "3mo", "6mo", "2y", ...)
    /// - interval: Data interval ("15m", "60m", "1d", "1wk", ...)
    pub async fn get_historical_data(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<CandleSeries, SourceError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);

        debug!(
            "Fetching Yahoo Finance data: {} range={} interval={}",
            url, range, interval
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("range", range),
                ("interval", interval),
                ("includePrePost", "false"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Yahoo reports unknown symbols as 404 with a chart.error body.
            if let Ok(data) = response.json::<YahooChartResponse>().await {
                if let Some(error) = data.chart.error {
                    return Err(SourceError::Api {
                        code: error.code,
                        description: error.description,
                    });
                }
            }
            return Err(SourceError::Status(status.as_u16()));
        }

        let data: YahooChartResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        let series = parse_chart(data)?;
        debug!("Yahoo returned {} candles for {}", series.len(), symbol);
        Ok(series)
    }
}

#[async_trait]
impl CandleSource for YahooFinanceClient {
    async fn fetch_candles(
        &self,
        symbol: &str,
        query: CandleQuery,
    ) -> Result<CandleSeries, SourceError> {
        self.get_historical_data(symbol, query.range, query.interval)
            .await
    }

    fn provider_symbol(&self, symbol: &str) -> String {
        to_yahoo_symbol(symbol)
    }
}
