use anyhow::Result;
use clap::Parser;
use forestwise_relay::ai::GeminiHttpClient;
use forestwise_relay::config::Config;
use forestwise_relay::relay::ChatRelay;
use forestwise_relay::server::{build_router, CHAT_PATH};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "forestwise-relay")]
#[command(about = "Relay ForestWise chat requests to Gemini")]
struct CliArgs {
    /// Interface to bind.
    #[arg(long, env = "FORESTWISE_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forestwise_relay=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let config = Config::from_env()?;

    info!("Upstream model: {}", config.model);
    if config.api_key().is_err() {
        warn!("GEMINI_API_KEY is not configured; chat requests will fail until it is set");
    }

    let upstream = GeminiHttpClient::from_config(&config);
    let relay = ChatRelay::new(config, Arc::new(upstream));
    let app = build_router(relay);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}{}", addr, CHAT_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
