//! FILENAME: app/server/src/lib.rs
// PURPOSE: Sales analytics HTTP service.
// CONTEXT: Loads the order dataset once, then serves read-only KPI views.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod logging;
pub mod params;
pub mod router;
pub mod routes;
pub mod state;

pub use config::{DataSource, ServerConfig};
pub use error::AppError;
pub use logging::{init_log_file, next_seq, write_log};
pub use router::sales_router;
pub use state::AppState;

/// Service entry point: configuration, logging, the one-time dataset load,
/// then the HTTP listener. Any startup failure is returned before binding.
pub async fn run() -> Result<(), AppError> {
    logging::init_log_bridge();

    let config = ServerConfig::from_env()?;

    if let Some(dir) = &config.log_dir {
        match init_log_file(dir) {
            Ok(path) => log_info!("SYS", "logging to {}", path.display()),
            Err(e) => log_warn!("SYS", "console logging only: {}", e),
        }
    }

    log_info!(
        "SYS",
        "starting v{} source={} listen={}",
        env!("CARGO_PKG_VERSION"),
        config.data_source,
        config.listen_addr
    );

    let dataset = bootstrap::load_dataset(&config.data_source).await?;
    let router = sales_router(AppState::new(dataset), config.request_timeout);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    log_info!("SYS", "listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_info!("SYS", "shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log_error!("SYS", "failed to listen for shutdown signal: {}", e);
    }
}
