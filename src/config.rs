use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    /// Keep sqlx statement logging on (target `sqlx::query`).
    pub sql_echo: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://database.db".into());
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = match std::env::var("APP_PORT") {
            Ok(v) => v.parse::<u16>().context("APP_PORT must be a port number")?,
            Err(_) => 8080,
        };
        let max_connections = match std::env::var("DB_MAX_CONNECTIONS") {
            Ok(v) => v
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            Err(_) => 5,
        };
        let sql_echo = std::env::var("SQL_ECHO")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Ok(Self {
            database_url,
            host,
            port,
            max_connections,
            sql_echo,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
