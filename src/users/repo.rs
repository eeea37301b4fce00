use crate::users::repo_types::{User, UserError};
use sqlx::SqlitePool;
use tracing::debug;

impl User {
    /// Insert a user in its own transaction; a constraint failure leaves no row behind.
    pub async fn create(
        db: &SqlitePool,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, UserError> {
        let mut tx = db.begin().await?;
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO "user" (username, email, password)
            VALUES (?, ?, ?)
            RETURNING id, username, email, password
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password)
        .fetch_one(&mut *tx)
        .await
        .map_err(classify)?;
        tx.commit().await?;

        debug!(user_id = user.id, username = %user.username, "user row inserted");
        Ok(user)
    }

    /// Find a user by exact username.
    pub async fn find_by_username(
        db: &SqlitePool,
        username: &str,
    ) -> Result<Option<User>, UserError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password
            FROM "user"
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// All users in insertion order.
    pub async fn list_all(db: &SqlitePool) -> Result<Vec<User>, UserError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password
            FROM "user"
            ORDER BY id ASC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(users)
    }
}

fn classify(e: sqlx::Error) -> UserError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return UserError::Duplicate(constraint_field(db_err.message()).unwrap_or("record"));
        }
        if db_err.is_check_violation() {
            return UserError::TooLong(constraint_field(db_err.message()).unwrap_or("value"));
        }
    }
    UserError::Database(e)
}

/// Column named in a constraint message such as `UNIQUE constraint failed: user.email`.
fn constraint_field(message: &str) -> Option<&'static str> {
    ["username", "email", "password"]
        .into_iter()
        .find(|field| message.contains(field))
}
