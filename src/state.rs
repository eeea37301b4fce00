use crate::config::AppConfig;
use crate::db;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let config = Arc::new(config);
        let db = db::connect(&config).await?;
        db::ensure_schema(&db).await?;

        Ok(Self { db, config })
    }

    /// Fresh in-memory database with the schema applied.
    #[cfg(test)]
    pub async fn in_memory() -> Self {
        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            host: "127.0.0.1".into(),
            port: 0,
            max_connections: 1,
            sql_echo: false,
        });
        let db = db::connect(&config).await.expect("in-memory pool");
        db::ensure_schema(&db).await.expect("migrations apply");
        Self { db, config }
    }
}
