use serde::{Deserialize, Serialize};

/// A single OHLC candle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Candle history stored as parallel columns, oldest first.
///
/// All five columns always have the same length and index `i` of each column
/// describes the same candle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandleSeries {
    timestamp: Vec<i64>,
    open: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
}

impl CandleSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty series with room for `capacity` candles.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            timestamp: Vec::with_capacity(capacity),
            open: Vec::with_capacity(capacity),
            high: Vec::with_capacity(capacity),
            low: Vec::with_capacity(capacity),
            close: Vec::with_capacity(capacity),
        }
    }

    /// Build a series from columns. Returns `None` if the columns differ in length.
    pub fn from_columns(
        timestamp: Vec<i64>,
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
    ) -> Option<Self> {
        let len = timestamp.len();
        if open.len() != len || high.len() != len || low.len() != len || close.len() != len {
            return None;
        }
        Some(Self {
            timestamp,
            open,
            high,
            low,
            close,
        })
    }

    /// Build a series where open/high/low all equal the close.
    ///
    /// Handy for fixtures and for sources that only report closing prices.
    pub fn from_closes(closes: &[f64], start: i64, step: i64) -> Self {
        let mut series = Self::with_capacity(closes.len());
        for (i, &close) in closes.iter().enumerate() {
            series.push(Candle {
                timestamp: start + i as i64 * step,
                open: close,
                high: close,
                low: close,
                close,
            });
        }
        series
    }

    pub fn push(&mut self, candle: Candle) {
        self.timestamp.push(candle.timestamp);
        self.open.push(candle.open);
        self.high.push(candle.high);
        self.low.push(candle.low);
        self.close.push(candle.close);
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Candle> {
        Some(Candle {
            timestamp: *self.timestamp.get(index)?,
            open: self.open[index],
            high: self.high[index],
            low: self.low[index],
            close: self.close[index],
        })
    }

    /// Most recent candle.
    pub fn last(&self) -> Option<Candle> {
        self.get(self.len().checked_sub(1)?)
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.timestamp
    }

    pub fn opens(&self) -> &[f64] {
        &self.open
    }

    pub fn highs(&self) -> &[f64] {
        &self.high
    }

    pub fn lows(&self) -> &[f64] {
        &self.low
    }

    pub fn closes(&self) -> &[f64] {
        &self.close
    }
}

/// Latest candle in the compact shape returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub c: f64,
    pub h: f64,
    pub l: f64,
    pub o: f64,
    pub t: i64,
}

impl From<Candle> for Quote {
    fn from(candle: Candle) -> Self {
        Self {
            c: candle.close,
            h: candle.high,
            l: candle.low,
            o: candle.open,
            t: candle.timestamp,
        }
    }
}

/// Interval/range pair understood by the market-data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandleQuery {
    pub interval: &'static str,
    pub range: &'static str,
}

/// Daily candles spanning roughly six months, used for higher-timeframe confirmation.
pub const DAILY_CONFIRMATION_QUERY: CandleQuery = CandleQuery {
    interval: "1d",
    range: "6mo",
};

/// How to obtain candles for a timeframe: what to fetch and how many fetched
/// candles make up one candle of the timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPlan {
    pub query: CandleQuery,
    pub aggregate: usize,
}

/// Chart timeframe requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[default]
    #[serde(rename = "Daily")]
    Daily,
    #[serde(rename = "Weekly")]
    Weekly,
}

impl Timeframe {
    /// Parse a timeframe label. Matching is case-insensitive and accepts the
    /// numeric resolutions charting tools use ("15", "60", "240", "D", "W").
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "15m" | "15" => Some(Self::FifteenMinutes),
            "1h" | "60" | "hourly" => Some(Self::OneHour),
            "4h" | "240" => Some(Self::FourHours),
            "daily" | "d" | "1d" => Some(Self::Daily),
            "weekly" | "w" | "1w" => Some(Self::Weekly),
            _ => None,
        }
    }

    /// Canonical label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FifteenMinutes => "15m",
            Self::OneHour => "1h",
            Self::FourHours => "4h",
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
        }
    }

    /// Intraday timeframes are checked against the daily trend.
    pub fn is_intraday(&self) -> bool {
        matches!(self, Self::FifteenMinutes | Self::OneHour | Self::FourHours)
    }

    /// Source query and aggregation factor for this timeframe.
    pub fn fetch_plan(&self) -> FetchPlan {
        let (interval, range, aggregate) = match self {
            Self::FifteenMinutes => ("15m", "5d", 1),
            Self::OneHour => ("60m", "1mo", 1),
            // The source has no 4h interval: fetch hourly candles and group by four.
            Self::FourHours => ("60m", "3mo", 4),
            Self::Daily => ("1d", "6mo", 1),
            Self::Weekly => ("1wk", "2y", 1),
        };
        FetchPlan {
            query: CandleQuery { interval, range },
            aggregate,
        }
    }
}
