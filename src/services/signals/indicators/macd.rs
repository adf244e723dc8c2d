//! MACD (Moving Average Convergence Divergence) indicator.

use super::{ema, Indicator};

/// MACD indicator.
///
/// Shows the relationship between two EMAs:
/// - MACD Line = EMA(12) - EMA(26)
/// - Signal Line = EMA(9) of MACD Line
/// - Histogram = MACD Line - Signal Line
///
/// All three series stay index-aligned with the input closes. The early
/// slow-EMA values are not yet meaningfully distinct from the fast ones and
/// are used as-is.
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

/// MACD line, signal line and histogram, each aligned with the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacdSeries {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl Macd {
    pub fn series(&self, values: &[f64]) -> MacdSeries {
        let fast = ema(values, self.fast_period);
        let slow = ema(values, self.slow_period);
        let line: Vec<f64> = fast.iter().zip(slow.iter()).map(|(f, s)| f - s).collect();
        let signal = ema(&line, self.signal_period);
        let histogram = line.iter().zip(signal.iter()).map(|(l, s)| l - s).collect();

        MacdSeries {
            line,
            signal,
            histogram,
        }
    }
}

impl Indicator for Macd {
    /// Histogram series.
    fn calculate(&self, values: &[f64]) -> Vec<f64> {
        self.series(values).histogram
    }
}

/// MACD(12, 26, 9) histogram aligned with `values`.
pub fn macd_histogram(values: &[f64]) -> Vec<f64> {
    Macd::default().calculate(values)
}
