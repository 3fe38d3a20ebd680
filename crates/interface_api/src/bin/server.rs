//! Facturation - API Server Binary
//!
//! This binary starts the HTTP API server of the invoicing system on top of
//! the in-memory stores.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin facturation-api
//!
//! # Run with environment variables
//! FACTURATION_PORT=3000 FACTURATION_LOG_FORMAT=json cargo run --bin facturation-api
//! ```
//!
//! # Environment Variables
//!
//! * `FACTURATION_HOST` - Server host (default: 0.0.0.0)
//! * `FACTURATION_PORT` - Server port (default: 8080)
//! * `FACTURATION_JWT_SECRET` - JWT signing secret (random per process when unset)
//! * `FACTURATION_JWT_EXPIRATION_SECS` - Token validity in seconds (default: 3600)
//! * `FACTURATION_LOG_LEVEL` - trace, debug, info, warn, error (default: info)
//! * `FACTURATION_LOG_FORMAT` - pretty or json (default: pretty)
//! * `FACTURATION_SEED_DEMO_DATA` - load the demo catalog (default: true)
//! * `FACTURATION_BOOTSTRAP_ADMIN_EMAIL` / `_PASSWORD` / `_NAME` - admin account created at startup
//! * `FACTURATION_COMPANY__NAME`, `FACTURATION_COMPANY__RIB`, ... - issuer details on invoices

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_identity::UserPort;
use infra_memory::{DemoData, MemoryStores};
use interface_api::config::{ApiConfig, LogFormat};
use interface_api::{create_router, AppState, Ports};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid FACTURATION_* configuration")?;

    init_tracing(&config.log_level, config.log_format);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Facturation API Server"
    );
    if std::env::var("FACTURATION_JWT_SECRET").is_err() {
        tracing::warn!("FACTURATION_JWT_SECRET is not set; sessions will not survive a restart");
    }

    let stores = MemoryStores::new();
    prepare_stores(&stores, &config).await?;

    let app = create_router(AppState::new(Ports::from(&stores), config.clone()));

    let addr: SocketAddr = config.server_addr().parse()?;
    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads the demo data and creates the bootstrap admin, as configured
async fn prepare_stores(stores: &MemoryStores, config: &ApiConfig) -> anyhow::Result<()> {
    if config.seed_demo_data {
        let report = DemoData::standard()
            .load(stores)
            .await
            .context("failed to load demo data")?;
        if !report.is_consistent() {
            tracing::warn!(
                discrepancies = report.discrepancies.len(),
                "Demo invoices were recorded with totals that differ from the recomputed ones"
            );
        }
    }

    if let Some((email, password, nom)) = config.bootstrap_admin() {
        let admin = stores
            .users
            .ensure_admin(email, password, nom)
            .await
            .context("failed to create the bootstrap admin")?;
        tracing::info!(user_id = %admin.id, email = %admin.email, "Bootstrap admin ready");
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
