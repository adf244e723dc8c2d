//! Higher-timeframe confirmation.
//!
//! Intraday signals are checked against the daily EMA50 trend. Missing,
//! short or failed daily data never blocks a signal: the check fails open.

use tracing::{debug, warn};

use super::indicators::{ema, slope, SLOPE_LOOKBACK};
use crate::sources::CandleSource;
use crate::types::{Timeframe, DAILY_CONFIRMATION_QUERY};

/// Daily closes needed before the EMA50 slope is trusted.
pub const MIN_CONFIRMATION_CLOSES: usize = 51;

/// Whether the daily trend is non-declining.
///
/// Fewer than [`MIN_CONFIRMATION_CLOSES`] closes confirm by default.
pub fn trend_confirmed(daily_closes: &[f64]) -> bool {
    if daily_closes.len() < MIN_CONFIRMATION_CLOSES {
        return true;
    }
    let ema50 = ema(daily_closes, 50);
    slope(&ema50, SLOPE_LOOKBACK) >= 0.0
}

/// Fetch daily candles for intraday timeframes and evaluate the trend.
///
/// Daily and weekly timeframes have no higher timeframe to consult and are
/// always confirmed.
pub async fn higher_timeframe_ok(
    source: &dyn CandleSource,
    symbol: &str,
    timeframe: Timeframe,
) -> bool {
    if !timeframe.is_intraday() {
        return true;
    }

    match source.fetch_candles(symbol, DAILY_CONFIRMATION_QUERY).await {
        Ok(daily) => {
            let confirmed = trend_confirmed(daily.closes());
            debug!(
                "Higher timeframe for {}: {} daily closes, confirmed={}",
                symbol,
                daily.len(),
                confirmed
            );
            confirmed
        }
        Err(e) => {
            warn!("Daily confirmation fetch failed for {}: {} (failing open)", symbol, e);
            true
        }
    }
}
