/// Database Module
///
/// This module handles all SQLite database operations including:
/// - Connection pool management
/// - Schema setup and teardown
/// - The per-run write handle used by the load stage
use anyhow::{Context, Result};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection};

pub struct Database {
    pool: SqlitePool,
}

/// Scoped write handle for one pipeline run.
///
/// Owns a pooled connection exclusively for the duration of the run. Writes
/// execute in SQLite autocommit mode: each statement is durable as soon as it
/// runs, so a failure mid-batch leaves the rows written before it in place.
/// The connection returns to the pool when the handle drops, on every exit
/// path.
pub struct UnitOfWork {
    conn: PoolConnection<Sqlite>,
}

impl UnitOfWork {
    pub(crate) fn conn(&mut self) -> &mut SqliteConnection {
        &mut *self.conn
    }
}

impl Database {
    /// Create a new database connection pool
    ///
    /// SQLite allows a single writer at a time, so the pool holds one
    /// connection.
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
            .context("Failed to connect to SQLite database")?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    #[allow(dead_code)]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Test the database connection
    pub async fn test_connection(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await.context("Database connection test failed")?;

        Ok(())
    }

    /// Create the posts table. Idempotent, safe to run on every startup.
    ///
    /// `modified` is maintained by the database at write time; callers never
    /// supply it.
    pub async fn create_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                id        TEXT PRIMARY KEY,
                community TEXT NOT NULL,
                title     TEXT NOT NULL,
                score     INTEGER NOT NULL,
                url       TEXT NOT NULL,
                comments  INTEGER NOT NULL,
                created   TEXT NOT NULL,
                text      TEXT NOT NULL,
                modified  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create posts table")?;

        tracing::info!("Posts table ensured");
        Ok(())
    }

    /// Drop the posts table. Idempotent, safe when the table is already gone.
    pub async fn drop_schema(&self) -> Result<()> {
        sqlx::query("DROP TABLE IF EXISTS posts").execute(&self.pool).await.context("Failed to drop posts table")?;

        tracing::info!("Posts table dropped");
        Ok(())
    }

    /// Check the connection out of the pool for one pipeline run.
    pub async fn acquire_writer(&self) -> Result<UnitOfWork> {
        let conn = self.pool.acquire().await.context("Failed to acquire a database connection")?;

        Ok(UnitOfWork { conn })
    }
}
