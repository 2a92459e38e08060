//! Eduverse Server — multi-tenant school management platform.
//!
//! Main entry point that wires all crates together and starts the server.

use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use eduverse_core::config::AppConfig;
use eduverse_core::error::AppError;
use eduverse_database::migration::{run_migrations, seed_roles};

/// How often the overdue payment sweep runs.
const OVERDUE_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() {
    let env = std::env::var("EDUVERSE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Failed to load configuration: {error}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(error) = run(config).await {
        tracing::error!("Server error: {error}");
        std::process::exit(1);
    }
}

/// Initialize tracing from the logging configuration.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Eduverse v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!("Connecting to database...");
    let db_pool = eduverse_database::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    run_migrations(&db_pool).await?;
    seed_roles(&db_pool).await?;
    tracing::info!("Database ready");

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let shutdown_grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = eduverse_api::build_state(config, db_pool);

    let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

    // Overdue sweep: once at startup, then on an interval, so payments past
    // their due date show as overdue without waiting for a read.
    let payment_service = state.payment_service.clone();
    let sweep_handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(OVERDUE_SWEEP_INTERVAL);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match payment_service.sweep_overdue().await {
                        Ok(0) => {}
                        Ok(count) => tracing::info!(count, "payments marked overdue"),
                        Err(error) => tracing::error!(%error, "overdue sweep failed"),
                    }
                }
                _ = shutdown_rx.changed() => break,
            }
        }
    });

    let app = eduverse_api::build_router(state);

    tracing::info!("Listening on {bind_addr}");
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {bind_addr}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    let _ = tokio::time::timeout(shutdown_grace, sweep_handle).await;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
