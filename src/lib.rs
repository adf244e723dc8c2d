//! TrueTrend - technical-indicator signal engine and HTTP API

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use services::Analyzer;
use sources::{CandleSource, SourceError, YahooFinanceClient};

// Re-export commonly used types
pub use error::{AppError, Result};
pub use types::*;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub analyzer: Arc<Analyzer>,
}

impl AppState {
    /// State backed by the Yahoo Finance client described by `config`.
    pub fn new(config: Config) -> std::result::Result<Self, SourceError> {
        let client = YahooFinanceClient::new(config.yahoo_base_url.clone(), config.request_timeout())?;
        Ok(Self::with_source(config, Arc::new(client)))
    }

    /// State backed by an arbitrary candle source.
    pub fn with_source(config: Config, source: Arc<dyn CandleSource>) -> Self {
        Self {
            config: Arc::new(config),
            analyzer: Arc::new(Analyzer::new(source)),
        }
    }
}

/// Build the HTTP application with CORS and request tracing.
pub fn app(state: AppState) -> Router {
    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
