use anyhow::Result;
use clap::Parser;
use composite_content::config::ContentConfig;
use composite_content::http;
use composite_content::lifecycle::{setup_tracing, ContentSystem};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ContentConfig::parse();

    // Setup tracing once for the entire application
    setup_tracing();

    info!(bind = %config.bind, capacity = config.channel_capacity, "Starting composite content service");

    let system = ContentSystem::with_config(&config);
    let app = http::router(system.service.clone());

    let listener = TcpListener::bind(config.bind).await?;
    info!("Listening on http://{}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    system.shutdown().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
