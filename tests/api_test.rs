//! Integration tests for the HTTP API against a mocked Yahoo Finance.

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use truetrend::{app, config::Config, AppState};

/// Yahoo chart payload for the given closes, one candle per day.
fn chart_body(closes: &[f64]) -> Value {
    let timestamps: Vec<i64> = (0..closes.len() as i64)
        .map(|i| 1_700_000_000 + i * 86_400)
        .collect();
    let highs: Vec<f64> = closes.iter().map(|c| c + 1.0).collect();
    let lows: Vec<f64> = closes.iter().map(|c| c - 1.0).collect();
    json!({
        "chart": {
            "result": [{
                "meta": {"symbol": "TEST", "dataGranularity": "1d"},
                "timestamp": timestamps,
                "indicators": {"quote": [{
                    "open": closes,
                    "high": highs,
                    "low": lows,
                    "close": closes,
                    "volume": vec![1000; closes.len()]
                }]}
            }],
            "error": null
        }
    })
}

fn rising(count: usize) -> Vec<f64> {
    (0..count).map(|i| 100.0 + i as f64).collect()
}

async fn test_app(server: &MockServer) -> Router {
    let config = Config {
        yahoo_base_url: server.uri(),
        request_timeout_secs: 5,
        ..Config::default()
    };
    app(AppState::new(config).expect("client builds"))
}

async fn mock_chart(server: &MockServer, ticker: &str, interval: &str, range: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v8/finance/chart/{}", ticker)))
        .and(query_param("interval", interval))
        .and(query_param("range", range))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    let request = Request::get("/api/health").body(Body::empty()).unwrap();
    let (status, body) = send(test_app(&server).await, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "truetrend");
}

// =============================================================================
// Analyze
// =============================================================================

#[tokio::test]
async fn test_analyze_success_contract() {
    let server = MockServer::start().await;
    mock_chart(&server, "AAPL", "1d", "6mo", chart_body(&rising(120))).await;

    let (status, body) = post_json(
        test_app(&server).await,
        "/api/analyze",
        json!({"symbol": "aapl"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], false);
    assert_eq!(body["symbol"], "AAPL");
    assert_eq!(body["timeframe"], "Daily");
    assert_eq!(body["strategy"], "trendline");
    assert_eq!(body["quote"]["c"], 219.0);
    assert!(body["indicators"]["ema9"].is_number());
    assert!(body["indicators"]["macd"]["hist"].is_number());
    assert_eq!(body["signal"]["action"], "BUY");
    assert!(body["signal"]["reasons"].is_array());
    assert_eq!(body["targets"]["entry"], 219.0);
    assert!(body["targets"]["tp"].is_number());
    assert!(body["voiceText"].as_str().unwrap().starts_with("AAPL on Daily at 219.00: buy"));
    assert_eq!(body["higherTimeframeOk"], true);
}

#[tokio::test]
async fn test_analyze_rewrites_crypto_ticker() {
    let server = MockServer::start().await;
    mock_chart(&server, "BTC-USD", "60m", "1mo", chart_body(&rising(100))).await;
    mock_chart(&server, "BTC-USD", "1d", "6mo", chart_body(&rising(120))).await;

    let (status, body) = post_json(
        test_app(&server).await,
        "/api/analyze",
        json!({"symbol": "BINANCE:BTCUSDT", "timeframe": "1h", "strategy": "cross"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symbol"], "BTC-USD");
    assert_eq!(body["strategy"], "cross");
    assert_eq!(body["higherTimeframeOk"], true);
}

#[tokio::test]
async fn test_analyze_rewrites_fx_ticker() {
    let server = MockServer::start().await;
    mock_chart(&server, "EURUSD=X", "1d", "6mo", chart_body(&vec![1.08; 80])).await;

    let (status, body) = post_json(
        test_app(&server).await,
        "/api/analyze",
        json!({"symbol": "OANDA:EUR_USD"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symbol"], "EURUSD=X");
    assert_eq!(body["signal"]["action"], "HOLD");
    assert_eq!(body["targets"], json!({}));
}

#[tokio::test]
async fn test_analyze_daily_fetch_failure_fails_open() {
    let server = MockServer::start().await;
    mock_chart(&server, "AAPL", "15m", "5d", chart_body(&rising(100))).await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .and(query_param("interval", "1d"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (status, body) = post_json(
        test_app(&server).await,
        "/api/analyze",
        json!({"symbol": "AAPL", "timeframe": "15m"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["higherTimeframeOk"], true);
}

#[tokio::test]
async fn test_analyze_missing_symbol_is_400() {
    let server = MockServer::start().await;
    let (status, body) =
        post_json(test_app(&server).await, "/api/analyze", json!({"timeframe": "1h"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": true, "message": "Missing symbol"}));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_analyze_unknown_strategy_is_400() {
    let server = MockServer::start().await;
    let (status, body) = post_json(
        test_app(&server).await,
        "/api/analyze",
        json!({"symbol": "AAPL", "strategy": "martingale"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_analyze_malformed_body_is_400() {
    let server = MockServer::start().await;
    let request = Request::post("/api/analyze")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(test_app(&server).await, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_analyze_upstream_error_is_502() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/NOPE"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "chart": {"result": null, "error": {"code": "Not Found", "description": "No data found"}}
        })))
        .mount(&server)
        .await;

    let (status, body) =
        post_json(test_app(&server).await, "/api/analyze", json!({"symbol": "NOPE"})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], true);
    assert!(body["message"].as_str().unwrap().contains("No data found"));
}

#[tokio::test]
async fn test_analyze_short_history_is_502() {
    let server = MockServer::start().await;
    mock_chart(&server, "AAPL", "1d", "6mo", chart_body(&rising(59))).await;

    let (status, body) =
        post_json(test_app(&server).await, "/api/analyze", json!({"symbol": "AAPL"})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["message"].as_str().unwrap().contains("59"));
}

#[tokio::test]
async fn test_analyze_get_returns_banner() {
    let server = MockServer::start().await;
    let request = Request::get("/api/analyze").body(Body::empty()).unwrap();
    let response = test_app(&server).await.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("TrueTrend API"));
}

#[tokio::test]
async fn test_analyze_other_methods_not_allowed() {
    let server = MockServer::start().await;
    let request = Request::delete("/api/analyze").body(Body::empty()).unwrap();
    let response = test_app(&server).await.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// =============================================================================
// Voice
// =============================================================================

#[tokio::test]
async fn test_voice_post_speaks_analysis() {
    let server = MockServer::start().await;
    mock_chart(&server, "TSLA", "1d", "6mo", chart_body(&rising(120))).await;

    let (status, body) = post_json(
        test_app(&server).await,
        "/api/voice",
        json!({"utterance": "what is the signal for tsla"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], "1.0");
    assert_eq!(body["response"]["outputSpeech"]["type"], "PlainText");
    assert_eq!(body["response"]["shouldEndSession"], true);
    assert!(body["response"]["outputSpeech"]["text"]
        .as_str()
        .unwrap()
        .starts_with("TSLA on Daily"));
}

#[tokio::test]
async fn test_voice_get_alias() {
    let server = MockServer::start().await;
    mock_chart(&server, "GC=F", "1d", "6mo", chart_body(&rising(120))).await;

    let request = Request::get("/api/voice?utterance=gold").body(Body::empty()).unwrap();
    let (status, body) = send(test_app(&server).await, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["response"]["outputSpeech"]["text"]
        .as_str()
        .unwrap()
        .starts_with("GC=F on Daily"));
}

#[tokio::test]
async fn test_voice_failure_apologises() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let request = Request::get("/api/voice?symbol=AAPL").body(Body::empty()).unwrap();
    let (status, body) = send(test_app(&server).await, request).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["response"]["outputSpeech"]["text"]
        .as_str()
        .unwrap()
        .starts_with("Sorry, I hit a snag:"));
}

#[tokio::test]
async fn test_voice_get_sentence_query() {
    let server = MockServer::start().await;
    mock_chart(&server, "MSFT", "1d", "6mo", chart_body(&rising(120))).await;

    let query = serde_urlencoded::to_string([("utterance", "how does msft look today")]).unwrap();
    let request = Request::get(format!("/api/voice?{}", query))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(test_app(&server).await, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["response"]["outputSpeech"]["text"]
        .as_str()
        .unwrap()
        .starts_with("MSFT on Daily"));
}

#[tokio::test]
async fn test_voice_sentence_with_exchange_ticker() {
    let server = MockServer::start().await;
    mock_chart(&server, "BTC-USD", "1d", "6mo", chart_body(&rising(120))).await;

    let (status, body) = post_json(
        test_app(&server).await,
        "/api/voice",
        json!({"utterance": "analyze BINANCE:BTCUSDT"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["response"]["outputSpeech"]["text"]
        .as_str()
        .unwrap()
        .starts_with("BTC-USD on Daily"));
}
