use serde::{Deserialize, Serialize, Serializer};

/// Trading action produced by a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl Action {
    /// Upper-case label ("BUY", "SELL", "HOLD").
    pub fn label(&self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Sell => "SELL",
            Action::Hold => "HOLD",
        }
    }

    /// Lower-case label used in spoken text.
    pub fn spoken(&self) -> &'static str {
        match self {
            Action::Buy => "buy",
            Action::Sell => "sell",
            Action::Hold => "hold",
        }
    }
}

/// Decision rule set applied to the indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    /// EMA50 slope plus price position against EMA9.
    #[default]
    Trendline,
    /// Fresh EMA9/EMA50 crossover.
    Cross,
    /// RSI extremes.
    RsiReversal,
    /// Close beyond the prior 19-bar range.
    Breakout,
}

impl Strategy {
    /// Parse from string (case-insensitive, snake_case accepted).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trendline" | "trend" => Some(Self::Trendline),
            "cross" | "ema_cross" => Some(Self::Cross),
            "rsireversal" | "rsi_reversal" | "rsi" => Some(Self::RsiReversal),
            "breakout" => Some(Self::Breakout),
            _ => None,
        }
    }

    /// Wire name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Trendline => "trendline",
            Self::Cross => "cross",
            Self::RsiReversal => "rsiReversal",
            Self::Breakout => "breakout",
        }
    }
}

/// Why a strategy reached its decision.
///
/// Serialized as its display text; tests and callers inside the crate match
/// on the variant or [`Reason::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    EmaCrossUp,
    EmaCrossDown,
    NoFreshCross,
    HigherTimeframeNotAligned,
    HigherTimeframeUpFade,
    RsiOversold,
    RsiOverbought,
    RsiMidRange,
    BreakoutHigh,
    BreakoutLow,
    InsideRange,
    TrendUp,
    TrendDown,
    NoAlignment,
    NoEdge,
}

impl Reason {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Reason::EmaCrossUp => "ema_cross_up",
            Reason::EmaCrossDown => "ema_cross_down",
            Reason::NoFreshCross => "no_fresh_cross",
            Reason::HigherTimeframeNotAligned => "htf_not_aligned",
            Reason::HigherTimeframeUpFade => "htf_up_fade",
            Reason::RsiOversold => "rsi_oversold",
            Reason::RsiOverbought => "rsi_overbought",
            Reason::RsiMidRange => "rsi_mid_range",
            Reason::BreakoutHigh => "breakout_high",
            Reason::BreakoutLow => "breakout_low",
            Reason::InsideRange => "inside_range",
            Reason::TrendUp => "trend_up",
            Reason::TrendDown => "trend_down",
            Reason::NoAlignment => "no_alignment",
            Reason::NoEdge => "no_edge",
        }
    }

    /// Short human-readable text.
    pub fn text(&self) -> &'static str {
        match self {
            Reason::EmaCrossUp => "EMA9 crossed above EMA50",
            Reason::EmaCrossDown => "EMA9 crossed below EMA50",
            Reason::NoFreshCross => "no fresh EMA cross",
            Reason::HigherTimeframeNotAligned => "higher timeframe not aligned",
            Reason::HigherTimeframeUpFade => "higher timeframe up, fade",
            Reason::RsiOversold => "RSI near oversold",
            Reason::RsiOverbought => "RSI near overbought",
            Reason::RsiMidRange => "RSI mid-range",
            Reason::BreakoutHigh => "breaking 20-bar high",
            Reason::BreakoutLow => "breaking 20-bar low",
            Reason::InsideRange => "still inside range",
            Reason::TrendUp => "EMA50 slope up + above EMA9",
            Reason::TrendDown => "EMA50 slope down + below EMA9",
            Reason::NoAlignment => "no clean alignment",
            Reason::NoEdge => "no edge detected",
        }
    }
}

impl Serialize for Reason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.text())
    }
}

/// Decision for a single request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    pub action: Action,
    /// Heuristic score, always within 5..=98.
    pub confidence: u8,
    pub reasons: Vec<Reason>,
}

impl Signal {
    pub fn has_reason(&self, reason: Reason) -> bool {
        self.reasons.contains(&reason)
    }

    /// Reason codes in order.
    pub fn reason_codes(&self) -> Vec<&'static str> {
        self.reasons.iter().map(Reason::code).collect()
    }
}

/// Entry, stop and take-profit levels. All absent for HOLD.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Targets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<f64>,
    #[serde(rename = "tp", skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<f64>,
}

impl Targets {
    pub fn is_empty(&self) -> bool {
        self.entry.is_none() && self.stop.is_none() && self.take_profit.is_none()
    }
}
