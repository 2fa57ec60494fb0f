use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use kino_api::config::ServerConfig;
use kino_api::router::build_app_router;
use kino_api::state::AppState;
use kino_api::telemetry;
use kino_db::DbPool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env().context("Invalid configuration")?;
    telemetry::init(config.log_format);

    let pool = prepare_store(&config).await?;
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config).context("Invalid CORS configuration")?;

    let addr = SocketAddr::new(
        config.host.parse().context("Invalid HOST address")?,
        config.port,
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    tracing::info!(%addr, "Serving screenings API");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    tracing::info!("Store pool closed, shutdown complete");
    Ok(())
}

/// Connect, verify and migrate the store before any request is accepted.
async fn prepare_store(config: &ServerConfig) -> anyhow::Result<DbPool> {
    let pool = kino_db::create_pool(&config.database_url, config.pool_settings())
        .await
        .context("Failed to connect to database")?;
    kino_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    kino_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!(
        max_connections = config.db_max_connections,
        store_timeout_secs = config.store_timeout_secs,
        "Store ready"
    );
    Ok(pool)
}

/// Resolve once SIGINT or (on Unix) SIGTERM arrives.
///
/// A handler that fails to install is logged and never resolves, leaving
/// the other signal in charge.
async fn shutdown_signal() {
    let interrupt = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => "SIGINT",
            Err(e) => {
                tracing::error!(error = %e, "Could not listen for SIGINT");
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                "SIGTERM"
            }
            Err(e) => {
                tracing::error!(error = %e, "Could not listen for SIGTERM");
                std::future::pending().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&'static str>();

    let received = tokio::select! {
        name = interrupt => name,
        name = terminate => name,
    };
    tracing::info!(signal = received, "Shutting down, draining in-flight requests");
}
