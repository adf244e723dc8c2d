//! Fixed-size candle grouping.

use crate::types::{Candle, CandleSeries};

/// Compress a candle series by grouping every `factor` consecutive candles.
///
/// Each window takes the first open and timestamp, the last close, the
/// highest high and the lowest low. A trailing window shorter than `factor`
/// is dropped, so the output has `len / factor` candles. A factor of 0 is
/// treated as 1.
pub fn aggregate(series: &CandleSeries, factor: usize) -> CandleSeries {
    let factor = factor.max(1);
    if factor == 1 {
        return series.clone();
    }

    let groups = series.len() / factor;
    let mut out = CandleSeries::with_capacity(groups);

    for group in 0..groups {
        let start = group * factor;
        let end = start + factor;

        let high = series.highs()[start..end]
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let low = series.lows()[start..end]
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);

        out.push(Candle {
            timestamp: series.timestamps()[start],
            open: series.opens()[start],
            high,
            low,
            close: series.closes()[end - 1],
        });
    }

    out
}
