//! Exponential Moving Average (EMA) indicator.

use super::Indicator;

/// EMA (Exponential Moving Average) indicator.
///
/// Gives exponentially decreasing weight to older closes. The series is
/// seeded with the first close rather than an SMA, so it is defined for
/// every index of the input.
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
        }
    }
}

impl Indicator for Ema {
    fn calculate(&self, values: &[f64]) -> Vec<f64> {
        ema(values, self.period)
    }
}

/// EMA series aligned with `values`: `ema[0] = values[0]`,
/// `ema[i] = values[i] * k + ema[i - 1] * (1 - k)` with `k = 2 / (period + 1)`.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };

    let k = 2.0 / (period.max(1) as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev = first;
    out.push(prev);

    for &value in &values[1..] {
        prev = value * k + prev * (1.0 - k);
        out.push(prev);
    }

    out
}
