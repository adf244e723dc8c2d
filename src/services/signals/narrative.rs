//! One-sentence spoken summary of a signal.

use crate::types::{Signal, Timeframe};

/// Reasons included in the summary.
const MAX_SPOKEN_REASONS: usize = 3;

/// Band label for a confidence value.
pub fn confidence_band(confidence: u8) -> &'static str {
    if confidence > 80 {
        "high confidence"
    } else if confidence > 60 {
        "good confidence"
    } else {
        "low confidence"
    }
}

/// Display precision: sub-10 prices (FX pairs, small caps) keep five decimals.
fn format_price(price: f64) -> String {
    if price.abs() < 10.0 {
        format!("{:.5}", price)
    } else {
        format!("{:.2}", price)
    }
}

/// Build the narrative, e.g.
/// `AAPL on Daily at 187.20: buy, confidence 72 (good confidence). EMA50 slope up + above EMA9.`
pub fn voice_text(symbol: &str, timeframe: Timeframe, price: f64, signal: &Signal) -> String {
    let reasons = signal
        .reasons
        .iter()
        .take(MAX_SPOKEN_REASONS)
        .map(|r| r.text())
        .collect::<Vec<_>>()
        .join("; ");

    let mut text = format!(
        "{} on {} at {}: {}, confidence {} ({})",
        symbol,
        timeframe.label(),
        format_price(price),
        signal.action.spoken(),
        signal.confidence,
        confidence_band(signal.confidence)
    );
    if !reasons.is_empty() {
        text.push_str(". ");
        text.push_str(&reasons);
    }
    text.push('.');
    text
}
