//! Per-request analysis pipeline.
//!
//! Validates the request, fetches candles (plus the daily series for
//! intraday confirmation), and runs aggregation, indicators, decision,
//! targets and narrative over them.

use std::sync::Arc;

use tracing::{debug, info};

use super::signals::{
    aggregate, decide, higher_timeframe_ok, round_to, targets_for, voice_text, IndicatorSet,
    OUTPUT_PRECISION,
};
use crate::error::{AppError, Result};
use crate::sources::CandleSource;
use crate::types::{
    AnalysisParams, AnalysisResponse, AnalyzeRequest, CandleSeries, Quote, Strategy, Targets,
    Timeframe,
};

/// Closes required after aggregation before indicators are computed.
pub const MIN_HISTORY: usize = 60;

/// Check a raw request and resolve its selectors.
///
/// Timeframe defaults to Daily and strategy to trendline; unknown labels are
/// rejected rather than defaulted.
pub fn validate(request: AnalyzeRequest) -> Result<AnalysisParams> {
    let symbol = request
        .symbol
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Missing symbol".to_string()))?
        .to_string();

    let timeframe = match non_empty(request.timeframe.as_deref()) {
        Some(label) => Timeframe::from_label(label).ok_or_else(|| {
            AppError::InvalidInput(format!("Unsupported timeframe: {}", label))
        })?,
        None => Timeframe::default(),
    };

    let strategy = match non_empty(request.strategy.as_deref()) {
        Some(name) => Strategy::from_str(name)
            .ok_or_else(|| AppError::InvalidInput(format!("Unsupported strategy: {}", name)))?,
        None => Strategy::default(),
    };

    Ok(AnalysisParams {
        symbol,
        timeframe,
        strategy,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn round_quote(quote: Quote) -> Quote {
    Quote {
        c: round_to(quote.c, OUTPUT_PRECISION),
        h: round_to(quote.h, OUTPUT_PRECISION),
        l: round_to(quote.l, OUTPUT_PRECISION),
        o: round_to(quote.o, OUTPUT_PRECISION),
        t: quote.t,
    }
}

fn round_targets(targets: Targets) -> Targets {
    let round = |v: Option<f64>| v.map(|v| round_to(v, OUTPUT_PRECISION));
    Targets {
        entry: round(targets.entry),
        stop: round(targets.stop),
        take_profit: round(targets.take_profit),
    }
}

/// Run the engine over candles that are already at the requested timeframe.
pub fn evaluate(
    symbol: &str,
    timeframe: Timeframe,
    strategy: Strategy,
    candles: &CandleSeries,
    higher_timeframe_ok: bool,
) -> Result<AnalysisResponse> {
    if candles.len() < MIN_HISTORY {
        return Err(AppError::InsufficientHistory {
            have: candles.len(),
            need: MIN_HISTORY,
        });
    }

    let last = candles
        .last()
        .ok_or_else(|| AppError::Internal("candle series is empty".to_string()))?;

    let indicators = IndicatorSet::compute(candles.closes());
    let summary = indicators
        .summary()
        .ok_or_else(|| AppError::Internal("indicator series is empty".to_string()))?;

    let signal = decide(
        strategy,
        &indicators.decision_input(candles, higher_timeframe_ok),
    );
    let targets = round_targets(targets_for(signal.action, last.close));
    let voice_text = voice_text(symbol, timeframe, last.close, &signal);

    debug!(
        "{} {} {}: {} ({}) reasons={:?}",
        symbol,
        timeframe.label(),
        strategy.name(),
        signal.action.label(),
        signal.confidence,
        signal.reason_codes()
    );

    Ok(AnalysisResponse {
        error: false,
        symbol: symbol.to_string(),
        timeframe,
        strategy,
        quote: round_quote(Quote::from(last)),
        indicators: summary,
        signal,
        targets,
        voice_text,
        higher_timeframe_ok,
        timestamp: chrono::Utc::now().timestamp_millis(),
    })
}

/// Analysis service bound to a market-data source.
pub struct Analyzer {
    source: Arc<dyn CandleSource>,
}

impl Analyzer {
    pub fn new(source: Arc<dyn CandleSource>) -> Self {
        Self { source }
    }

    /// Fetch, aggregate and evaluate.
    ///
    /// The primary fetch and the daily confirmation fetch run concurrently.
    /// Only the primary fetch can fail the request.
    pub async fn analyze(&self, params: &AnalysisParams) -> Result<AnalysisResponse> {
        let ticker = self.source.provider_symbol(&params.symbol);
        let plan = params.timeframe.fetch_plan();

        debug!(
            "Analyzing {} (source ticker {}) on {} with {}",
            params.symbol,
            ticker,
            params.timeframe.label(),
            params.strategy.name()
        );

        let (primary, htf_ok) = tokio::join!(
            self.source.fetch_candles(&ticker, plan.query),
            higher_timeframe_ok(self.source.as_ref(), &ticker, params.timeframe),
        );

        let candles = aggregate(&primary?, plan.aggregate);
        let response = evaluate(
            &ticker,
            params.timeframe,
            params.strategy,
            &candles,
            htf_ok,
        )?;

        info!(
            "{} {} -> {} ({})",
            ticker,
            params.timeframe.label(),
            response.signal.action.label(),
            response.signal.confidence
        );

        Ok(response)
    }
}
