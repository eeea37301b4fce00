use crate::state::AppState;
use axum::Router;

pub mod handlers;

pub fn router() -> Router<AppState> {
    handlers::page_routes()
}
