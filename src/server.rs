//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, click worker spawning, and the
//! Axum server lifecycle.

use crate::application::services::LinkService;
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::PgLinkRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes, in order:
/// - the PostgreSQL connection pool (created once, shared for the process
///   lifetime)
/// - embedded migrations
/// - the background click worker
/// - the Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, migration run, or server
/// bind fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);

    let repository = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    tokio::spawn(run_click_worker(
        click_rx,
        repository.clone() as Arc<dyn LinkRepository>,
    ));
    tracing::info!("Click worker started");

    let link_service = Arc::new(LinkService::new(repository, click_tx.clone()));
    let state = AppState::new(link_service, click_tx, Arc::new(config.clone()));

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}
