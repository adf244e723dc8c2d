use serde::{Deserialize, Serialize};

use super::{Quote, Signal, Strategy, Targets, Timeframe};

/// Body of `POST /api/analyze`. Everything is optional on the wire so that
/// missing fields become validation errors rather than parse errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub timeframe: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
}

/// Validated analysis parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisParams {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub strategy: Strategy,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacdSummary {
    pub hist: f64,
}

/// Latest value of each indicator series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSummary {
    pub ema9: f64,
    pub ema50: f64,
    pub rsi14: f64,
    pub macd: MacdSummary,
}

/// Successful analysis response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub error: bool,
    pub symbol: String,
    pub timeframe: Timeframe,
    pub strategy: Strategy,
    pub quote: Quote,
    pub indicators: IndicatorSummary,
    pub signal: Signal,
    pub targets: Targets,
    pub voice_text: String,
    pub higher_timeframe_ok: bool,
    pub timestamp: i64,
}
