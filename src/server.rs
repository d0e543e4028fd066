//! HTTP server initialization and runtime setup.
//!
//! Handles store connections, migrations, service wiring, and the Axum
//! server lifecycle.

use crate::config::Config;
use crate::domain::repositories::{LinkRepository, RankingError, RankingRepository};
use crate::infrastructure::persistence::{MemoryLinkRepository, PgLinkRepository};
use crate::infrastructure::ranking::{MemoryRanking, RedisRanking};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// The two store handles the services are built on.
pub struct Stores {
    pub links: Arc<dyn LinkRepository>,
    pub ranking: Arc<dyn RankingRepository>,
}

/// What to do when Redis is configured but cannot be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingFallback {
    /// Keep serving with an in-memory ranking that reports itself unhealthy.
    InMemory,
    /// Fail, so no command silently reads or clears the wrong leaderboard.
    Fail,
}

/// Backoff between startup connection attempts: 100ms, 200ms, 400ms, ... capped at 5s, with jitter.
fn connect_strategy(attempts: usize) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(2)
        .factor(50)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(attempts.saturating_sub(1))
}

/// Opens a PostgreSQL pool and applies pending migrations.
///
/// # Errors
///
/// Returns an error if every connection attempt fails or a migration fails.
pub async fn connect_database(config: &Config, database_url: &str) -> Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    let pool = Retry::spawn(connect_strategy(config.connect_retries), || {
        let options = options.clone();
        async move {
            options.connect(database_url).await.inspect_err(|e| {
                tracing::warn!(error = %e, "Database connection attempt failed");
            })
        }
    })
    .await
    .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;
    tracing::info!("Migrations applied");

    Ok(pool)
}

/// Connects both stores according to the configuration.
///
/// Without `DATABASE_URL` the links are kept in memory. Without Redis the
/// click ranking is kept in memory. If Redis is configured but unreachable,
/// `fallback` decides between a degraded in-memory ranking and an error.
///
/// # Errors
///
/// Returns an error if a configured database cannot be reached, or if Redis
/// cannot be reached and `fallback` is [`RankingFallback::Fail`].
pub async fn connect_stores(config: &Config, fallback: RankingFallback) -> Result<Stores> {
    let links: Arc<dyn LinkRepository> = match &config.database_url {
        Some(database_url) => {
            let pool = connect_database(config, database_url).await?;
            Arc::new(PgLinkRepository::new(Arc::new(pool)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, links are kept in memory only");
            Arc::new(MemoryLinkRepository::new())
        }
    };

    let ranking: Arc<dyn RankingRepository> = if let Some(redis_url) = &config.redis_url {
        let connected = Retry::spawn(connect_strategy(config.connect_retries), || {
            RedisRanking::connect(redis_url, config.ranking_key.clone())
        })
        .await;

        match connected {
            Ok(redis) => {
                tracing::info!("Click ranking enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => fall_back(fallback, e)?,
        }
    } else {
        tracing::info!("Click ranking in memory (Redis not configured)");
        Arc::new(MemoryRanking::new())
    };

    Ok(Stores { links, ranking })
}

/// Applies `fallback` to a failed Redis connection.
fn fall_back(fallback: RankingFallback, error: RankingError) -> Result<Arc<dyn RankingRepository>> {
    match fallback {
        RankingFallback::InMemory => {
            tracing::warn!(
                error = %error,
                "Failed to connect to Redis. Using in-memory ranking, reported as degraded."
            );
            Ok(Arc::new(MemoryRanking::stand_in()))
        }
        RankingFallback::Fail => {
            Err(anyhow::Error::new(error).context("Redis is configured but unreachable"))
        }
    }
}

/// Resolves when the process receives Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Link store (PostgreSQL with migrations, or in-memory)
/// - Click ranking (Redis, or in-memory fallback)
/// - Services and shared state
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let stores = connect_stores(&config, RankingFallback::InMemory).await?;

    let state = AppState::new(stores.links, stores.ranking, config.ranking_timeout());

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
