//! Analysis API endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    routing::get,
    Json, Router,
};

use crate::error::{AppError, Result};
use crate::services::validate;
use crate::types::{AnalysisResponse, AnalyzeRequest};
use crate::AppState;

const USAGE_BANNER: &str = r#"<html><head><meta charset="utf-8"><title>TrueTrend API</title>
<style>body{font-family:system-ui,-apple-system,Segoe UI,Roboto,Inter,Arial;background:#0b1220;color:#e6e9ef;padding:24px}</style></head>
<body><h1>TrueTrend API</h1><p>POST /api/analyze with {"symbol":"AAPL","timeframe":"15m|1h|4h|Daily|Weekly","strategy":"trendline|cross|rsiReversal|breakout"}</p></body></html>"#;

/// Create the analyze router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/analyze", get(banner).post(analyze))
}

/// Usage banner for browsers hitting the endpoint directly.
async fn banner() -> Html<&'static str> {
    Html(USAGE_BANNER)
}

/// Run an analysis for the posted symbol/timeframe/strategy.
async fn analyze(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>> {
    let Json(request) =
        payload.map_err(|e| AppError::InvalidInput(format!("Invalid request body: {}", e.body_text())))?;

    let params = validate(request)?;
    let response = state.analyzer.analyze(&params).await?;

    Ok(Json(response))
}
