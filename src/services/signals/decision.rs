//! Strategy decision engine.
//!
//! A pure function of the latest candle, its indicator series and the
//! higher-timeframe flag. Each strategy picks an action, a raw confidence and
//! its reasons; the result is then finalized the same way for all of them:
//! HOLD gets [`Reason::NoEdge`] appended and confidence is rounded and
//! clamped to [`MIN_CONFIDENCE`]..=[`MAX_CONFIDENCE`].

use super::indicators::{slope, SLOPE_LOOKBACK};
use super::{clamp_confidence, MIN_CONFIDENCE};
use crate::types::{Action, Reason, Signal, Strategy};

/// Candles preceding the last one that make up the breakout range.
const BREAKOUT_WINDOW: usize = 19;

const RSI_OVERSOLD: f64 = 32.0;
const RSI_OVERBOUGHT: f64 = 68.0;

/// Confidence deducted when a cross trades against the higher timeframe.
const HTF_PENALTY: f64 = 15.0;

/// Price and indicator series for one decision. All series are aligned with
/// `closes`; only the last index (and the one before it) is read, plus the
/// breakout range for [`Strategy::Breakout`].
#[derive(Debug, Clone, Copy)]
pub struct DecisionInput<'a> {
    pub closes: &'a [f64],
    pub highs: &'a [f64],
    pub lows: &'a [f64],
    pub ema9: &'a [f64],
    pub ema50: &'a [f64],
    pub rsi14: &'a [f64],
    pub macd_hist: &'a [f64],
    pub higher_timeframe_ok: bool,
}

/// Values at the last index shared by all strategies.
struct Latest {
    n: usize,
    price: f64,
    ema9: f64,
    ema50: f64,
    bull: bool,
    ema_slope: f64,
    rsi: f64,
    macd_up: bool,
}

impl Latest {
    fn read(input: &DecisionInput) -> Option<Self> {
        let n = input.closes.len().checked_sub(1)?;
        let ema9 = *input.ema9.get(n)?;
        let ema50 = *input.ema50.get(n)?;
        Some(Self {
            n,
            price: input.closes[n],
            ema9,
            ema50,
            bull: ema9 > ema50,
            ema_slope: slope(&input.ema50[..=n], SLOPE_LOOKBACK),
            rsi: *input.rsi14.get(n)?,
            macd_up: *input.macd_hist.get(n)? > 0.0,
        })
    }
}

/// Raw strategy outcome before finalization.
struct Draft {
    action: Action,
    confidence: f64,
    reasons: Vec<Reason>,
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Decide on an action for the last candle.
///
/// Input without a last candle (or with indicator series shorter than the
/// closes) yields HOLD at minimum confidence.
pub fn decide(strategy: Strategy, input: &DecisionInput) -> Signal {
    let Some(latest) = Latest::read(input) else {
        return Signal {
            action: Action::Hold,
            confidence: MIN_CONFIDENCE,
            reasons: vec![Reason::NoEdge],
        };
    };

    let draft = match strategy {
        Strategy::Cross => cross(input, &latest),
        Strategy::RsiReversal => rsi_reversal(&latest),
        Strategy::Breakout => breakout(input, &latest),
        Strategy::Trendline => trendline(input, &latest),
    };

    let mut reasons = draft.reasons;
    if draft.action == Action::Hold {
        reasons.push(Reason::NoEdge);
    }

    Signal {
        action: draft.action,
        confidence: clamp_confidence(draft.confidence),
        reasons,
    }
}

fn cross(input: &DecisionInput, latest: &Latest) -> Draft {
    let (crossed_up, crossed_down) = match latest.n.checked_sub(1) {
        Some(prev) => {
            let prev_fast = input.ema9[prev];
            let prev_slow = input.ema50[prev];
            (
                prev_fast <= prev_slow && latest.ema9 > latest.ema50,
                prev_fast >= prev_slow && latest.ema9 < latest.ema50,
            )
        }
        None => (false, false),
    };

    let (action, mut reasons) = if crossed_up {
        (Action::Buy, vec![Reason::EmaCrossUp])
    } else if crossed_down {
        (Action::Sell, vec![Reason::EmaCrossDown])
    } else {
        (Action::Hold, vec![Reason::NoFreshCross])
    };

    let htf = input.higher_timeframe_ok;
    let mut confidence = (latest.ema_slope.abs() * 300.0
        + 25.0 * flag(crossed_up || crossed_down)
        + 15.0 * flag(htf)
        + 10.0 * flag(latest.macd_up))
    .min(95.0);

    if action == Action::Buy && !htf {
        confidence -= HTF_PENALTY;
        reasons.push(Reason::HigherTimeframeNotAligned);
    }
    if action == Action::Sell && htf {
        confidence -= HTF_PENALTY;
        reasons.push(Reason::HigherTimeframeUpFade);
    }

    Draft {
        action,
        confidence,
        reasons,
    }
}

fn rsi_reversal(latest: &Latest) -> Draft {
    let r = latest.rsi;
    let (action, reason) = if r < RSI_OVERSOLD {
        (Action::Buy, Reason::RsiOversold)
    } else if r > RSI_OVERBOUGHT {
        (Action::Sell, Reason::RsiOverbought)
    } else {
        (Action::Hold, Reason::RsiMidRange)
    };

    // Grows with distance from 50.
    let confidence = (80.0 - (70.0 - (50.0 - r).abs()) + 8.0 * flag(latest.macd_up)).min(92.0);

    Draft {
        action,
        confidence,
        reasons: vec![reason],
    }
}

fn breakout(input: &DecisionInput, latest: &Latest) -> Draft {
    // Range covers the candles before the last one, so the last close can
    // never break its own high or low.
    let start = latest.n.saturating_sub(BREAKOUT_WINDOW);
    let highs = input.highs.get(start..latest.n).unwrap_or_default();
    let lows = input.lows.get(start..latest.n).unwrap_or_default();

    let (action, reason) = if highs.is_empty() || lows.is_empty() {
        (Action::Hold, Reason::InsideRange)
    } else {
        let highest = highs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let lowest = lows.iter().copied().fold(f64::INFINITY, f64::min);
        if latest.price > highest {
            (Action::Buy, Reason::BreakoutHigh)
        } else if latest.price < lowest {
            (Action::Sell, Reason::BreakoutLow)
        } else {
            (Action::Hold, Reason::InsideRange)
        }
    };

    let base = if action == Action::Hold { 40.0 } else { 70.0 };
    let trend = if latest.bull { 6.0 } else { -2.0 };
    let confidence = (base + 6.0 * flag(latest.macd_up) + trend).min(90.0);

    Draft {
        action,
        confidence,
        reasons: vec![reason],
    }
}

fn trendline(input: &DecisionInput, latest: &Latest) -> Draft {
    let (action, reason) = if latest.ema_slope > 0.0 && latest.price >= latest.ema9 {
        (Action::Buy, Reason::TrendUp)
    } else if latest.ema_slope < 0.0 && latest.price <= latest.ema9 {
        (Action::Sell, Reason::TrendDown)
    } else {
        (Action::Hold, Reason::NoAlignment)
    };

    let trend = if latest.bull { 8.0 } else { -4.0 };
    let confidence = (latest.ema_slope.abs() * 400.0
        + 10.0 * flag(latest.macd_up)
        + trend
        + 10.0 * flag(input.higher_timeframe_ok))
    .min(93.0);

    Draft {
        action,
        confidence,
        reasons: vec![reason],
    }
}
