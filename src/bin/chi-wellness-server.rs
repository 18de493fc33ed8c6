// ABOUTME: Server binary wiring configuration, logging, and external service clients
// ABOUTME: Clears the sessions store at startup and serves the wellness API over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Chi Wellness

//! # Chi Wellness API Server Binary
//!
//! Starts the wellness backend: loads configuration from the environment,
//! initializes logging, constructs the store/identity/generation clients
//! exactly once, invalidates all prior sessions, and serves the HTTP API.

use anyhow::Result;
use chi_wellness_server::{
    config::environment::ServerConfig, logging, resources::ServerResources, routes,
};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

/// Whole-request deadline at the HTTP boundary; generation calls carry their
/// own tighter timeout inside it
const REQUEST_DEADLINE: Duration = Duration::from_secs(60);

#[derive(Parser)]
#[command(name = "chi-wellness-server")]
#[command(about = "Chi Wellness API - backend for the Chi personal wellness app")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting Chi Wellness API");
    info!("{}", config.summary());

    let http_port = config.http_port;
    let resources = Arc::new(ServerResources::from_config(config).await?);

    // Every token minted before this restart is now invalid
    resources.sessions.clear_all().await?;

    let app = routes::router(resources)
        .layer(TraceLayer::new_for_http())
        // Accept from all origins for now; restrict to the app's URLs in prod
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(REQUEST_DEADLINE));

    let addr = SocketAddr::from(([0, 0, 0, 0], http_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    display_available_endpoints(http_port);
    info!("Server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    // Graceful shutdown on ctrl-c; errors here only mean no signal handler
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}

/// Display the API surface at startup
fn display_available_endpoints(port: u16) {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());

    info!("=== Available API Endpoints ===");
    info!("  POST http://{host}:{port}/login");
    info!("  POST http://{host}:{port}/signup");
    info!("  POST http://{host}:{port}/set_user_data");
    info!("  POST http://{host}:{port}/update_water");
    info!("  POST http://{host}:{port}/update_sleep");
    info!("  POST http://{host}:{port}/update_exercise");
    info!("  POST http://{host}:{port}/update_journal");
    info!("  POST http://{host}:{port}/get_lifestyle_score");
    info!("  POST http://{host}:{port}/get_advice");
    info!("  POST http://{host}:{port}/update_location");
    info!("  GET  http://{host}:{port}/health");
}
