// comment-app - organization-scoped comment service
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use comment_app::cli::Args;
use comment_app::config::AppConfig;
use comment_app::server::{create_router, AppState};
use comment_app::utils::logging;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    // Phase 2: Initialize logging
    logging::init(&config)?;
    info!("Starting {} v{}", config.app_name, env!("CARGO_PKG_VERSION"));
    info!(
        "Database adapter: insert={} read={} delete={}",
        config.dbadapter_insert_uri, config.dbadapter_read_uri, config.dbadapter_delete_uri
    );
    info!("Audit logger: {}", config.logger_app_uri);

    // Phase 3: Build outbound clients and the router
    let addr = config.bind_addr();
    let state = AppState::from_config(config)?;
    let app = create_router(state);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;

    // Phase 4: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
