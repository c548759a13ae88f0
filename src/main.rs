use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use nawal_planner_api::config::{self, StoreBackend};
use nawal_planner_api::database::DatabaseManager;
use nawal_planner_api::{app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, API_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = config::config();
    tracing::info!("Starting Nawal Planner API in {:?} mode", config.environment);

    if config.api.api_key.is_none() {
        tracing::error!("API_KEY is not set; /tasks and /goals will answer 500 until it is configured");
    }

    // No traffic is served without a confirmed store connection
    let (state, database) = match config.database.backend {
        StoreBackend::Postgres => {
            let database = DatabaseManager::connect(config)
                .await
                .context("store connection failed")?;
            database
                .ensure_schema()
                .await
                .context("store schema bootstrap failed")?;
            let state = AppState::postgres(database.pool(), config.api.api_key.clone());
            (state, Some(database))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; records are lost on restart");
            (AppState::in_memory(config.api.api_key.clone()), None)
        }
    };

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Nawal Planner API listening on http://{}", bind_addr);

    axum::serve(listener, app(state, config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(database) = database {
        database.close().await;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
