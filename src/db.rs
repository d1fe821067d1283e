//! Database module
//!
//! Shared connection pool and schema verification.
//! DDL lives in `migrations/` and is applied outside the service.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;

use crate::config::{Config, ConfigError};

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Indexes the repository depends on, besides the primary key
const REQUIRED_INDEXES: [&str; 2] = ["away_team_index", "city_index"];

/// Errors opening the shared pool
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database connection failed: {0}")]
    Connect(#[from] sqlx::Error),
}

/// Process-wide pool, connected on first use.
///
/// Concurrent first callers wait on a single connection attempt. If that
/// attempt fails the cell stays empty and the next call tries again.
pub async fn shared_pool(config: &Config) -> Result<&'static PgPool, PoolError> {
    let url = config
        .database_url
        .as_deref()
        .ok_or(ConfigError::MissingEnv("DATABASE_URL"))?;

    POOL.get_or_try_init(|| async {
        tracing::info!("Connecting to database...");
        PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(url)
            .await
            .map_err(PoolError::from)
    })
    .await
}

/// Simple connectivity check
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Check that the events table and its secondary indexes exist
pub async fn check_schema(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let table_exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM information_schema.tables
            WHERE table_schema = 'public' AND table_name = 'events'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        tracing::error!("Required table 'events' does not exist");
        return Ok(false);
    }

    for index in REQUIRED_INDEXES {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM pg_indexes
                WHERE schemaname = 'public' AND tablename = 'events' AND indexname = $1
            )
            "#,
        )
        .bind(index)
        .fetch_one(pool)
        .await?;

        if !exists {
            tracing::error!("Required index '{}' does not exist", index);
            return Ok(false);
        }
    }

    tracing::info!("Schema verified: events, {}", REQUIRED_INDEXES.join(", "));
    Ok(true)
}

/// Close the shared pool if it was ever opened
pub async fn close_shared_pool() {
    if let Some(pool) = POOL.get() {
        pool.close().await;
        tracing::info!("Database connections closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shared_pool_without_url_is_config_error() {
        let config = Config::from_lookup(|key| {
            (key == "STORE_BACKEND").then(|| "memory".to_string())
        })
        .unwrap();

        let err = shared_pool(&config).await.unwrap_err();
        assert!(matches!(
            err,
            PoolError::Config(ConfigError::MissingEnv("DATABASE_URL"))
        ));
        assert!(POOL.get().is_none());
    }
}
