// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ran command-line entry point.
//!
//! `ran add --gpx <file>` ingests a recording; `ran api` serves stored
//! activities to the web UI until interrupted.

use clap::Parser;
use ran::{
    cli::{read_gpx_file, Cli, Commands},
    config::Config,
    db::ActivityStore,
    services::ActivityProcessor,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let store = ActivityStore::connect(&config.database_url).await?;

    match cli.command {
        Commands::Add(args) => {
            tracing::info!(gpx_file = %args.gpx.display(), "Adding activity");
            let gpx = read_gpx_file(&args.gpx).await?;

            let result = ActivityProcessor::new(store).process_gpx(gpx).await?;
            tracing::info!(
                digest = %result.digest,
                name = %result.name,
                distance = result.distance,
                "Activity added"
            );
            println!("Activity added successfully");
        }
        Commands::Api => serve(config, store).await?,
    }

    Ok(())
}

/// Run the HTTP server until Ctrl-C.
async fn serve(config: Config, store: ActivityStore) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", config.port);
    let state = Arc::new(AppState { config, store });
    let app = ran::routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down server");
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ran=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
