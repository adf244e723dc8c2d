//! Voice-assistant endpoint.
//!
//! Pulls a ticker out of a spoken utterance, runs the Daily trendline
//! analysis and answers with an Alexa-style plain-text speech payload.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{AnalysisParams, Strategy, Timeframe};
use crate::AppState;

/// Ticker used when the utterance names none.
pub const DEFAULT_SYMBOL: &str = "AAPL";

/// Words that commonly precede a ticker in a spoken request.
const FILLER_WORDS: &[&str] = &[
    "ABOUT", "ALEXA", "AND", "ANALYZE", "ASK", "BUY", "CHECK", "DOES", "FOR", "GIVE", "HOW",
    "IS", "LOOK", "LOOKS", "ME", "NOW", "OF", "ON", "PLEASE", "PRICE", "SELL", "SHOULD",
    "SIGNAL", "STOCK", "TELL", "THE", "TODAY", "TREND", "TRUE", "WHAT", "WHATS",
];

/// Spoken names for futures contracts.
const ALIASES: &[(&str, &str)] = &[("GOLD", "GC=F"), ("SILVER", "SI=F"), ("OIL", "CL=F")];

#[derive(Debug, Default, Deserialize)]
pub struct VoiceRequest {
    #[serde(default)]
    pub utterance: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Serialize)]
struct OutputSpeech {
    #[serde(rename = "type")]
    kind: &'static str,
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechBody {
    output_speech: OutputSpeech,
    should_end_session: bool,
}

/// Alexa custom-skill response carrying a single plain-text answer.
#[derive(Debug, Serialize)]
struct AlexaResponse {
    version: &'static str,
    response: SpeechBody,
}

impl AlexaResponse {
    fn speech(text: impl Into<String>) -> Self {
        Self {
            version: "1.0",
            response: SpeechBody {
                output_speech: OutputSpeech {
                    kind: "PlainText",
                    text: text.into(),
                },
                should_end_session: true,
            },
        }
    }
}

fn resolve_alias(word: &str) -> String {
    ALIASES
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, ticker)| ticker.to_string())
        .unwrap_or_else(|| word.to_string())
}

/// Find the ticker in an utterance.
///
/// A single token is taken as the ticker itself (so `BINANCE:BTCUSDT` or
/// `BRK.B` pass through). In a sentence, an `EXCHANGE:TICKER` token wins;
/// otherwise the first 2 to 6 letter word that is not a filler word does.
pub fn extract_symbol(utterance: &str) -> String {
    let utterance = utterance.trim();
    if utterance.is_empty() {
        return DEFAULT_SYMBOL.to_string();
    }

    if !utterance.contains(char::is_whitespace) {
        return resolve_alias(&utterance.to_uppercase());
    }

    let exchange_ticker = utterance
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| matches!(c, ',' | '.' | '?' | '!')))
        .find(|token| token.contains(':') && !token.starts_with(':') && !token.ends_with(':'));
    if let Some(token) = exchange_ticker {
        return token.to_uppercase();
    }

    utterance
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|word| (2..=6).contains(&word.len()))
        .map(str::to_uppercase)
        .find(|word| !FILLER_WORDS.contains(&word.as_str()))
        .map(|word| resolve_alias(&word))
        .unwrap_or_else(|| DEFAULT_SYMBOL.to_string())
}

/// Create the voice router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/voice", get(voice_get).post(voice_post))
}

async fn voice_get(State(state): State<AppState>, Query(query): Query<VoiceRequest>) -> Response {
    let spoken = query.utterance.or(query.symbol).unwrap_or_default();
    respond(&state, &spoken).await
}

async fn voice_post(
    State(state): State<AppState>,
    Query(query): Query<VoiceRequest>,
    body: Result<Json<VoiceRequest>, JsonRejection>,
) -> Response {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let spoken = body
        .utterance
        .or(body.symbol)
        .or(query.utterance)
        .or(query.symbol)
        .unwrap_or_default();
    respond(&state, &spoken).await
}

async fn respond(state: &AppState, utterance: &str) -> Response {
    let params = AnalysisParams {
        symbol: extract_symbol(utterance),
        timeframe: Timeframe::Daily,
        strategy: Strategy::Trendline,
    };

    match state.analyzer.analyze(&params).await {
        Ok(analysis) => (StatusCode::OK, Json(AlexaResponse::speech(analysis.voice_text))).into_response(),
        Err(e) => {
            warn!("Voice analysis for {} failed: {}", params.symbol, e);
            (
                e.status_code(),
                Json(AlexaResponse::speech(format!("Sorry, I hit a snag: {}", e))),
            )
                .into_response()
        }
    }
}
