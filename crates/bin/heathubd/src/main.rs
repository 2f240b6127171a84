//! # heathubd — heathub daemon
//!
//! Composition root that wires all adapters together, runs heating cycles
//! and serves the dashboard.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the collaborators (virtual adapters) and the journal store
//! - Construct application services, injecting adapters via port traits
//! - Run a single cycle (cron mode) or one cycle per interval
//! - Build the axum router and serve the dashboard alongside the scheduler
//! - Handle graceful shutdown (Ctrl-C)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod runner;
mod wiring;

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

use heathub_adapter_http_axum::state::AppState;
use heathub_adapter_storage_sqlite_sqlx::SqliteJournal;
use heathub_app::services::journal_service::JournalService;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = heathub_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let journal = SqliteJournal::new(db.pool().clone());
    let journal_service = Arc::new(JournalService::new(journal.clone()));

    // Heating cycle
    let cycle = wiring::build_cycle(&config, journal, chrono::Utc::now())?;
    let max_log_entries = config.journal.max_log_entries;

    if config.scheduler.interval_secs == 0 {
        tracing::info!("running a single heating cycle");
        runner::tick(&cycle, &journal_service, max_log_entries).await?;
        return Ok(());
    }

    // HTTP
    let server = if config.server.enabled {
        Some(serve(&config, Arc::clone(&journal_service)).await?)
    } else {
        None
    };

    let period = Duration::from_secs(config.scheduler.interval_secs);
    tracing::info!(interval_secs = config.scheduler.interval_secs, "scheduler started");
    runner::run_every(
        &cycle,
        &journal_service,
        max_log_entries,
        period,
        shutdown_signal(),
    )
    .await;

    if let Some(server) = server {
        server.await??;
    }
    Ok(())
}

async fn serve(
    config: &Config,
    journal: Arc<JournalService<SqliteJournal>>,
) -> Result<JoinHandle<std::io::Result<()>>, std::io::Error> {
    let state = AppState::from_arc(journal).with_refresh_seconds(config.server.refresh_seconds);
    let app = heathub_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "dashboard listening");

    Ok(tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
