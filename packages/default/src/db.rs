use crate::models::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use tracing::{debug, info};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn connect(db: &DatabaseConfig) -> Result<PgPool> {
    debug!("connecting to {}", db.masked_url());
    PgPoolOptions::new()
        .max_connections(db.max_connections)
        .acquire_timeout(db.acquire_timeout)
        .connect(&db.to_url())
        .await
        .context("connecting to database")
}

/// Pool that only connects on first use.
pub fn connect_lazy(db: &DatabaseConfig) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(db.max_connections)
        .acquire_timeout(db.acquire_timeout)
        .connect_lazy(&db.to_url())
        .context("configuring lazy database pool")
}

pub async fn validate_db_connection(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .context("database is not reachable")?;
    Ok(())
}

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("======== APPLYING MIGRATIONS ========");
    MIGRATOR.run(pool).await.context("applying migrations")?;
    info!("✅ database schema is up to date");
    Ok(())
}
