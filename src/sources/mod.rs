//! Market-data sources.

pub mod yahoo;

pub use yahoo::{to_yahoo_symbol, YahooFinanceClient};

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{CandleQuery, CandleSeries};

/// Failure talking to a market-data provider.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned HTTP {0}")]
    Status(u16),

    #[error("provider error: {code} - {description}")]
    Api { code: String, description: String },

    #[error("malformed provider payload: {0}")]
    Malformed(String),
}

/// Provider of OHLC candles for a ticker.
///
/// `symbol` is already in the provider's own ticker format.
#[async_trait]
pub trait CandleSource: Send + Sync {
    async fn fetch_candles(
        &self,
        symbol: &str,
        query: CandleQuery,
    ) -> Result<CandleSeries, SourceError>;

    /// Rewrite a user-facing ticker into this provider's format.
    fn provider_symbol(&self, symbol: &str) -> String {
        symbol.trim().to_uppercase()
    }
}
