use anyhow::Result;
use dotenv::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glam_social_api::api;
use glam_social_api::config::Config;
use glam_social_api::db::init_database;
use glam_social_api::services::reconcile;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if present
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,glam_social_api=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::init()?;
    info!("Initialized configuration");

    // Initialize database
    let db = Arc::new(init_database().await?);
    info!("Connected to database");

    // Start the background counter reconciler
    let reconciler_handle = if config.reconciler.enabled {
        let reconciler_db = db.clone();
        Some(tokio::spawn(async move {
            reconcile::run_loop(reconciler_db).await;
        }))
    } else {
        info!("Counter reconciler disabled by configuration");
        None
    };

    // Start API server
    let api_handle = tokio::spawn(async move {
        if let Err(e) = api::start_api_server(db).await {
            error!("API server error: {}", e);
        }
    });

    // Handle shutdown signals
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, shutting down"),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }

    api_handle.abort();
    if let Some(handle) = reconciler_handle {
        handle.abort();
    }

    info!("GlamSocial API shutdown complete");
    Ok(())
}
