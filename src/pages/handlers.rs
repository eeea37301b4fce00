use axum::{
    response::Html,
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{state::AppState, views};

#[derive(Debug, Deserialize)]
pub struct NameForm {
    pub nome: Option<String>,
}

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/form", get(show_form))
        .route("/processar", post(handle_form))
}

pub async fn index() -> Html<String> {
    Html(views::render_index())
}

pub async fn show_form() -> Html<String> {
    Html(views::render_name_form())
}

/// Echoes the submitted name back as plain text; nothing is stored.
#[instrument(skip(form))]
pub async fn handle_form(Form(form): Form<NameForm>) -> String {
    let nome = form.nome.unwrap_or_default();
    debug!(%nome, "name form received");
    format!("Hello, {nome}! Form received successfully.")
}
