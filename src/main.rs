mod app;
mod auth;
mod config;
mod db;
mod pages;
mod state;
mod users;
mod views;

use crate::{config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        let mut filter = "userbase=debug,axum=info,tower_http=info,sqlx=warn".to_string();
        if config.sql_echo {
            filter.push_str(",sqlx::query=debug");
        }
        filter
    });
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    // connects and applies migrations
    let app_state = AppState::init(config).await?;

    let addr = app_state.config.bind_addr();
    let app = app::build_app(app_state);
    app::serve(app, &addr).await
}
