//! Database Layer
//!
//! `PostgreSQL` connection pool, migrations and purchase records.
//! Webhook registration queries live in [`crate::webhooks::queries`].

/// Log and return a database error with context.
///
/// Keeps every failed query visible in the logs before the error is
/// propagated to the command layer.
macro_rules! db_error {
    ($query:expr, $($field:tt)*) => {
        |e| {
            tracing::error!(query = $query, $($field)*, error = %e, "Database query failed");
            e
        }
    };
}

pub(crate) use db_error;

mod models;
mod queries;

#[cfg(test)]
mod tests;

use std::time::Duration;

use anyhow::Result;
pub use models::*;
pub use queries::*;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{error, info};

/// Create `PostgreSQL` connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(5)
        // Prevent hanging commands on pool exhaustion
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        // Catch connections dropped by serverless Postgres providers
        .test_before_acquire(true)
        .connect(database_url)
        .await?;

    info!("Connected to PostgreSQL");
    Ok(pool)
}

/// Run database migrations.
///
/// Tables are created with `IF NOT EXISTS`, so this is safe against a
/// database that was set up before migrations were tracked.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed");
    Ok(())
}

/// Connect and migrate, logging instead of failing.
///
/// The bot keeps serving place files when the database is down; commands that
/// need persistence check for `None` and tell the user.
pub async fn connect_optional(database_url: Option<&str>) -> Option<PgPool> {
    let Some(url) = database_url else {
        info!("No database configured, webhook registration disabled");
        return None;
    };

    let pool = match create_pool(url).await {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "Error connecting to PostgreSQL, webhook registration disabled");
            return None;
        }
    };

    if let Err(e) = run_migrations(&pool).await {
        error!(error = %e, "Database migrations failed, webhook registration disabled");
        return None;
    }

    Some(pool)
}
