//! Technical indicator implementations.
//!
//! Every indicator maps a close-price series to a series of the same length,
//! where index `i` is the value as of candle `i`.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod slope;

pub use ema::{ema, Ema};
pub use macd::{macd_histogram, Macd, MacdSeries};
pub use rsi::{rsi, Rsi, NEUTRAL_RSI};
pub use slope::{slope, SLOPE_LOOKBACK};

/// Trait for implementing series indicators.
pub trait Indicator: Send + Sync {
    /// Calculate the indicator series, aligned 1:1 with `values`.
    fn calculate(&self, values: &[f64]) -> Vec<f64>;
}
