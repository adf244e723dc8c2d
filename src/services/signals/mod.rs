//! Trading signals service module.
//!
//! Candle aggregation, indicator series, higher-timeframe confirmation,
//! strategy decisions and the price levels/narrative built from them.

pub mod aggregate;
pub mod confirmation;
pub mod decision;
pub mod indicators;
pub mod narrative;
pub mod targets;

pub use aggregate::aggregate;
pub use confirmation::{higher_timeframe_ok, trend_confirmed};
pub use decision::{decide, DecisionInput};
pub use narrative::{confidence_band, voice_text};
pub use targets::targets_for;

use crate::types::{CandleSeries, IndicatorSummary, MacdSummary};
use indicators::{Ema, Indicator, Macd, Rsi};

/// Lowest confidence ever reported.
pub const MIN_CONFIDENCE: u8 = 5;
/// Highest confidence ever reported.
pub const MAX_CONFIDENCE: u8 = 98;

/// Decimal places for prices and indicator values returned to callers.
pub const OUTPUT_PRECISION: u32 = 4;

/// Round and clamp a raw confidence to `MIN_CONFIDENCE..=MAX_CONFIDENCE`.
pub fn clamp_confidence(value: f64) -> u8 {
    if value.is_nan() {
        return MIN_CONFIDENCE;
    }
    value
        .round()
        .clamp(MIN_CONFIDENCE as f64, MAX_CONFIDENCE as f64) as u8
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// The indicator series every strategy reads, aligned with the closes.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    pub ema9: Vec<f64>,
    pub ema50: Vec<f64>,
    pub rsi14: Vec<f64>,
    pub macd_hist: Vec<f64>,
}

impl IndicatorSet {
    pub fn compute(closes: &[f64]) -> Self {
        Self {
            ema9: Ema::new(9).calculate(closes),
            ema50: Ema::new(50).calculate(closes),
            rsi14: Rsi::default().calculate(closes),
            macd_hist: Macd::default().calculate(closes),
        }
    }

    /// Borrow the series together with the candles as decision input.
    pub fn decision_input<'a>(
        &'a self,
        candles: &'a CandleSeries,
        higher_timeframe_ok: bool,
    ) -> DecisionInput<'a> {
        DecisionInput {
            closes: candles.closes(),
            highs: candles.highs(),
            lows: candles.lows(),
            ema9: &self.ema9,
            ema50: &self.ema50,
            rsi14: &self.rsi14,
            macd_hist: &self.macd_hist,
            higher_timeframe_ok,
        }
    }

    /// Latest value of each series, rounded for output.
    pub fn summary(&self) -> Option<IndicatorSummary> {
        Some(IndicatorSummary {
            ema9: round_to(*self.ema9.last()?, OUTPUT_PRECISION),
            ema50: round_to(*self.ema50.last()?, OUTPUT_PRECISION),
            rsi14: round_to(*self.rsi14.last()?, OUTPUT_PRECISION),
            macd: MacdSummary {
                hist: round_to(*self.macd_hist.last()?, OUTPUT_PRECISION),
            },
        })
    }
}
