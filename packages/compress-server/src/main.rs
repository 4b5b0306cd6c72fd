mod checkout;
mod config;
mod handler;

use std::sync::Arc;

use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use tracing_subscriber::EnvFilter;

use crate::checkout::{CheckoutProvider, StripeClient};
use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub checkout: Arc<dyn CheckoutProvider>,
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handler::health))
        .route("/api/create-checkout", post(handler::create_checkout))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    if let Err(err) = config.checkout_settings() {
        // 起動は続行し、リクエスト時にエラーを返す
        tracing::warn!(error = %err, "checkout is not configured");
    }

    let state = AppState {
        checkout: Arc::new(StripeClient::new(config.stripe_api_base.clone())),
        config: Arc::new(config),
    };
    let bind_addr = state.config.bind_addr.clone();

    let listener = bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "compress-server listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn bind(addr: &str) -> anyhow::Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
