use std::future::Future;
use std::time::{Duration, Instant};

use migration::MigrationCommand;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{db_url, DbKind};
use crate::error::AppError;

const CONNECT_ATTEMPTS_POSTGRES: u32 = 5;
const CONNECT_RETRY_INTERVAL_MS: u64 = 500;

fn db_engine(kind: DbKind) -> &'static str {
    match kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteMemory => "sqlite",
    }
}

/// Retry a connection attempt with fixed interval delays.
/// Returns the result of the last attempt after all retries are exhausted.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut last_error = AppError::db_unavailable();

    for attempt in 1..=max_attempts {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempt, interval_ms, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) => {
                last_error = e;
                if attempt < max_attempts {
                    warn!(attempt, max_attempts, interval_ms, "connection_retry=failed");
                    tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                }
            }
        }
    }

    Err(last_error)
}

/// Open a connection pool. Does NOT run migrations.
///
/// An in-memory SQLite database lives inside a single connection, so that
/// pool is capped at one connection.
pub async fn connect_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind)?;

    let mut options = ConnectOptions::new(url);
    options.sqlx_logging(false);
    match kind {
        DbKind::SqliteMemory => {
            options.max_connections(1).min_connections(1);
        }
        DbKind::Postgres => {
            options
                .max_connections(10)
                .connect_timeout(Duration::from_secs(5))
                .acquire_timeout(Duration::from_secs(5));
        }
    }

    let attempts = match kind {
        DbKind::Postgres => CONNECT_ATTEMPTS_POSTGRES,
        DbKind::SqliteMemory => 1,
    };

    let started = Instant::now();
    let conn = retry_connection(
        || {
            let options = options.clone();
            async move {
                Database::connect(options).await.map_err(|e| {
                    warn!(error = %e, "database connect failed");
                    AppError::db_unavailable()
                })
            }
        },
        attempts,
        CONNECT_RETRY_INTERVAL_MS,
    )
    .await?;

    info!(
        engine = db_engine(kind),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "database connected"
    );
    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(kind).await?;
    migration::migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::db(format!("Migration failed: {e}")))?;
    info!(engine = db_engine(kind), "schema migrated");
    Ok(conn)
}
