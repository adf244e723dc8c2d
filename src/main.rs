use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use truetrend::{app, config::Config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "truetrend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!(
        "Starting TrueTrend server on {}:{} (market data: {})",
        config.host, config.port, config.yahoo_base_url
    );

    let addr = config.bind_addr();
    let state = AppState::new(config)?;

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("TrueTrend server listening on {}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
