//! Relative Strength Index (RSI) indicator.

use super::Indicator;

/// Value reported where there is not enough history, and for flat prices.
pub const NEUTRAL_RSI: f64 = 50.0;

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Values range from 0-100:
/// - Below 30: Oversold
/// - Above 70: Overbought
///
/// Uses Wilder smoothing: the first average covers `period` deltas, later
/// averages are updated as `avg = (avg * (period - 1) + delta) / period`.
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Indicator for Rsi {
    fn calculate(&self, values: &[f64]) -> Vec<f64> {
        rsi(values, self.period)
    }
}

/// RSI series aligned with `values`.
///
/// Indices before `period` (or every index, when there are fewer than
/// `period + 1` values) hold [`NEUTRAL_RSI`].
pub fn rsi(values: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    let mut out = vec![NEUTRAL_RSI; values.len()];
    if values.len() < period + 1 {
        return out;
    }

    let p = period as f64;
    let mut gains = 0.0;
    let mut losses = 0.0;
    for i in 1..=period {
        let change = values[i] - values[i - 1];
        if change > 0.0 {
            gains += change;
        } else {
            losses -= change;
        }
    }

    let mut avg_gain = gains / p;
    let mut avg_loss = losses / p;
    out[period] = wilder_rsi(avg_gain, avg_loss);

    for i in period + 1..values.len() {
        let change = values[i] - values[i - 1];
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);
        avg_gain = (avg_gain * (p - 1.0) + gain) / p;
        avg_loss = (avg_loss * (p - 1.0) + loss) / p;
        out[i] = wilder_rsi(avg_gain, avg_loss);
    }

    out
}

/// `100 - 100 / (1 + avg_gain / avg_loss)`.
///
/// Only exactly zero averages count as flat, so moves of any scale register.
fn wilder_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { NEUTRAL_RSI } else { 100.0 };
    }
    let rs = avg_gain / avg_loss;
    (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
}
