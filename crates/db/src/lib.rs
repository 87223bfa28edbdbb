//! Postgres persistence for the Redline revision-history subsystem.
//!
//! Row models live in [`models`], stateless repository structs in
//! [`repositories`]. Schema is managed by the SQL migrations under
//! `db/migrations` at the workspace root.

use sqlx::postgres::PgPoolOptions;

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from the given configuration.
pub async fn create_pool(config: &config::DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
