//! Relative slope over a short trailing window.

/// Default lookback for trend slope checks.
pub const SLOPE_LOOKBACK: usize = 6;

/// Relative change across the trailing `lookback` values:
/// `(last - first) / max(|first|, 1e-9)` where `first` is `series[len - lookback]`.
///
/// Shorter series use whatever is available; fewer than two points give 0.
pub fn slope(series: &[f64], lookback: usize) -> f64 {
    let window = &series[series.len().saturating_sub(lookback)..];
    if window.len() < 2 {
        return 0.0;
    }

    let first = window[0];
    let last = window[window.len() - 1];
    (last - first) / first.abs().max(1e-9)
}
