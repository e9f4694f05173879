// ABOUTME: Server binary for the Boris coaching API
// ABOUTME: Loads configuration, opens storage, wires the gateway and tracker, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

//! # Boris Coach Server Binary
//!
//! Starts the HTTP API with environment configuration. `--http-port` and
//! `--database-url` override the corresponding environment variables.

use std::future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use boris_coach::coaching::CoachingGateway;
use boris_coach::config::ServerConfig;
use boris_coach::database::SqliteStore;
use boris_coach::engagement::SystemClock;
use boris_coach::llm::Persona;
use boris_coach::logging;
use boris_coach::resources::ServerResources;
use boris_coach::routes;

#[derive(Parser)]
#[command(name = "boris-server")]
#[command(about = "Boris health coach API - AI coaching with streaks and achievements")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    info!("Starting Boris coach server");
    info!("{}", config.summary());

    let persona = Persona::load(config.persona_file.as_deref())?;
    let store = SqliteStore::connect(&config.database_url).await?;
    let gateway = CoachingGateway::new(config.llm.clone(), persona)?;

    if gateway.selected_provider().is_none() {
        warn!("No LLM credential configured; /api/coach will answer 503");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let resources = Arc::new(ServerResources::new(
        config,
        Arc::new(store),
        gateway,
        Arc::new(SystemClock),
    ));
    let app = routes::router(resources);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("HTTP server listening on http://{addr}");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {e}");
        return Err(e.into());
    }

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}
