//! SQLite database handle
//!
//! Owns the connection pool and hands out stores bound to it.
//! Migrations are embedded and applied on connect.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use super::{AccountDirectory, RelationshipStore, StatusStore};
use crate::error::AppError;

const DEFAULT_MAX_CONNECTIONS: u32 = 8;

/// Database connection pool wrapper.
///
/// The pool is the storage handle shared by every store; cloning a store
/// clones the pool handle, not the connections.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    // =========================================================================
    // Connection
    // =========================================================================

    /// Connect to SQLite database
    ///
    /// Creates the database file if it doesn't exist.
    /// Runs pending migrations automatically.
    ///
    /// # Arguments
    /// * `path` - Path to SQLite database file
    ///
    /// # Errors
    /// Returns error if connection or migration fails
    pub async fn connect(path: &Path) -> Result<Self, AppError> {
        Self::connect_with_max_connections(path, DEFAULT_MAX_CONNECTIONS).await
    }

    /// Connect with an explicit pool size.
    pub async fn connect_with_max_connections(
        path: &Path,
        max_connections: u32,
    ) -> Result<Self, AppError> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Database(sqlx::Error::Io(e)))?;
        }

        let connection_string = format!("sqlite:{}?mode=rwc", path.display());
        let options = SqliteConnectOptions::from_str(&connection_string)?
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Migration failed: {}", e);
                AppError::Internal(anyhow::anyhow!("Migration failed: {}", e))
            })?;

        tracing::info!(path = %path.display(), "Database connected and migrated successfully");

        Ok(Self { pool })
    }

    /// Underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // =========================================================================
    // Stores
    // =========================================================================

    /// Account lookups and creation
    pub fn accounts(&self) -> AccountDirectory {
        AccountDirectory::new(self.pool.clone())
    }

    /// Status rows and timelines
    pub fn statuses(&self) -> StatusStore {
        StatusStore::new(self.pool.clone())
    }

    /// Follow edges and their counters
    pub fn relationships(&self) -> RelationshipStore {
        RelationshipStore::new(self.pool.clone())
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
