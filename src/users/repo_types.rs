use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User record in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,          // assigned by the database, never reused
    pub username: String, // unique, at most 80 chars
    pub email: String,    // unique, at most 120 chars
    #[serde(skip_serializing)]
    pub password: String, // Argon2 PHC string, or empty for no credential
}

/// Store failures that callers are expected to recover from.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("{0} already registered")]
    Duplicate(&'static str),
    #[error("{0} is too long")]
    TooLong(&'static str),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl UserError {
    /// Message safe to show on a page; `None` for infrastructure failures.
    pub fn user_message(&self) -> Option<String> {
        match self {
            UserError::Duplicate(field) => Some(format!("{} already registered.", capitalize(field))),
            UserError::TooLong(field) => Some(format!("{} is too long.", capitalize(field))),
            UserError::Database(_) => None,
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
