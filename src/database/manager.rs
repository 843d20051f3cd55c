use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::OnceLock;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::{self, ConfigError};

/// Errors from the database layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("could not reach the database: {0}")]
    Connection(sqlx::Error),

    #[error("referential integrity violation: {0}")]
    ForeignKeyViolation(String),

    #[error("invalid value for field '{0}'")]
    InvalidValue(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Process-wide connection pool, created lazily on first use. A failed
/// attempt is not cached: the next request resolves configuration and
/// connects again.
pub struct DatabaseManager {
    pool: RwLock<Option<PgPool>>,
}

impl DatabaseManager {
    fn instance() -> &'static DatabaseManager {
        static INSTANCE: OnceLock<DatabaseManager> = OnceLock::new();
        INSTANCE.get_or_init(|| DatabaseManager {
            pool: RwLock::new(None),
        })
    }

    pub async fn pool() -> Result<PgPool, DatabaseError> {
        let manager = Self::instance();

        // Fast path: pool already built
        {
            let guard = manager.pool.read().await;
            if let Some(pool) = guard.as_ref() {
                return Ok(pool.clone());
            }
        }

        let url = config::database_url()?;
        let pool = PgPoolOptions::new()
            .max_connections(config::config().max_connections)
            .connect(&url)
            .await
            .map_err(DatabaseError::Connection)?;

        let mut guard = manager.pool.write().await;
        if let Some(existing) = guard.as_ref() {
            // Another request won the race while we were connecting
            return Ok(existing.clone());
        }
        *guard = Some(pool.clone());
        info!("created database connection pool");
        Ok(pool)
    }

    /// Pings the database to confirm connectivity
    pub async fn health_check() -> Result<(), DatabaseError> {
        let pool = Self::pool().await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        Ok(())
    }
}
