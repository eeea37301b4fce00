use std::{str::FromStr, time::Duration};

use anyhow::Context;
use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    ConnectOptions, SqlitePool,
};

use crate::config::AppConfig;

/// Embedded schema migrations; `run` skips anything already applied.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn connect(config: &AppConfig) -> anyhow::Result<SqlitePool> {
    let mut options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("parse DATABASE_URL {}", config.database_url))?
        .create_if_missing(true);
    if !config.sql_echo {
        options = options.disable_statement_logging();
    }

    let mut pool = SqlitePoolOptions::new().max_connections(config.max_connections);
    // every in-memory connection is its own database
    if config.database_url.contains(":memory:") {
        pool = pool
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>);
    }

    pool.connect_with(options)
        .await
        .context("connect to database")
}

pub async fn ensure_schema(db: &SqlitePool) -> anyhow::Result<()> {
    MIGRATOR.run(db).await.context("run migrations")?;
    Ok(())
}
