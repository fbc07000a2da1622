//! # Database Persistence Layer
//!
//! SQLite persistence via SQLx. The schema is embedded and applied on every
//! start; both tables are created with `IF NOT EXISTS`, so a database file
//! from an earlier deployment is adopted in place.
//!
//! Each submodule is a set of free functions taking a `&SqlitePool`.

pub mod users;
pub mod vehicles;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Open (creating if missing) the database at `url` and apply migrations.
pub async fn connect(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    tracing::info!(url, "connected to SQLite");
    migrate(&pool).await?;
    Ok(pool)
}

/// Private in-memory database with the schema applied.
///
/// Pinned to a single connection that never expires, since every SQLite
/// `:memory:` connection is its own database.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// Apply embedded migrations.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("database migrations applied");
    Ok(())
}

/// Round-trip a trivial query. Used by the readiness probe.
pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
