use anyhow::{Context, Result};
use std::sync::Arc;

use sonicpulse::config::Config;
use sonicpulse::dashboard::Dashboard;
use sonicpulse::server::DashboardServer;

use super::build_provider;

pub async fn serve(config: &Config) -> Result<()> {
    let provider = build_provider(config)?;
    let dashboard = Arc::new(Dashboard::new(provider, &config.dashboard));

    let server = DashboardServer::new(config.server.clone(), dashboard)
        .context("Failed to create dashboard server")?;

    println!("SonicPulse dashboard API on http://{}", server.bind_address());

    server
        .start_with_shutdown(shutdown_signal())
        .await
        .context("Dashboard server failed")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
