//! gradetrack-ui - Weighted assessment tracker
//!
//! Single-binary web service: JSON API for assessments and grade
//! statistics, plus the embedded browser frontend, on one port.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gradetrack_common::config::{AppConfig, ConfigOverrides};
use gradetrack_common::db::init_database;
use gradetrack_ui::{build_router, cors_layer, AppState};

/// Command-line arguments for gradetrack-ui
///
/// Every value can also come from the environment or the TOML config
/// file; the command line wins.
#[derive(Parser, Debug)]
#[command(name = "gradetrack-ui")]
#[command(about = "Weighted assessment tracker with what-if projections")]
#[command(version)]
struct Args {
    /// Interface to bind
    #[arg(long, env = "GRADETRACK_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "GRADETRACK_PORT")]
    port: Option<u16>,

    /// Path to the SQLite database file
    #[arg(short, long, env = "GRADETRACK_DATABASE")]
    database: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(short, long, env = "GRADETRACK_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "gradetrack_ui=info,gradetrack_common=info,tower_http=info".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately, before any slow startup work
    info!(
        "Starting gradetrack-ui v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let overrides = ConfigOverrides {
        host: args.host,
        port: args.port,
        database_path: args.database,
        allowed_origins: None,
    };
    let config = AppConfig::load(args.config.as_deref(), overrides)
        .context("Failed to load configuration")?;

    info!("Database path: {}", config.database_path.display());
    let pool = init_database(&config.database_path)
        .await
        .context("Failed to initialize database")?;

    let state = AppState::new(pool);
    let app = build_router(state).layer(cors_layer(&config.allowed_origins));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("gradetrack-ui listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
