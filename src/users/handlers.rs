use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Router,
};
use tracing::{info, instrument, warn};

use crate::{app::internal, state::AppState, users::repo_types::User, views};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/add_user/:username/:email", get(add_user))
        .route("/users", get(list_users))
}

/// Quick add straight from the URL. The row gets no credential, so it can
/// show up in listings but can never log in.
#[instrument(skip(state))]
pub async fn add_user(
    State(state): State<AppState>,
    Path((username, email)): Path<(String, String)>,
) -> Result<String, (StatusCode, String)> {
    match User::create(&state.db, &username, &email, "").await {
        Ok(user) => {
            info!(user_id = user.id, username = %user.username, "user added");
            Ok(format!("User {} added successfully!", user.username))
        }
        Err(e) => match e.user_message() {
            Some(msg) => {
                warn!(error = %e, %username, "add_user rejected");
                Ok(format!("Could not add user {username}: {msg}"))
            }
            None => Err(internal(e)),
        },
    }
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    let users = User::list_all(&state.db).await.map_err(internal)?;
    Ok(Html(views::render_users(&users)))
}
