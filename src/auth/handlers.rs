use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    app::internal,
    auth::{
        dto::{present, LoginForm, RegisterForm},
        password::{hash_password, verify_password},
    },
    state::AppState,
    users::repo_types::User,
    views,
};

pub(crate) const LOGIN_FAILED: &str = "Login failed: invalid username or password.";
const MISSING_FIELDS: &str = "All fields are required.";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_page).post(register))
        .route("/login", get(login_page).post(login))
}

pub async fn register_page() -> Html<String> {
    Html(views::render_register("", "", None))
}

pub async fn login_page() -> Html<String> {
    Html(views::render_login())
}

#[instrument(skip(state, form))]
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, (StatusCode, String)> {
    let (username, email, password) = match (
        present(form.username),
        present(form.email),
        present(form.password),
    ) {
        (Some(u), Some(e), Some(p)) => (u, e, p),
        (u, e, _) => {
            warn!("register form incomplete");
            let page = views::render_register(
                u.as_deref().unwrap_or_default(),
                e.as_deref().unwrap_or_default(),
                Some(MISSING_FIELDS),
            );
            return Ok(Html(page).into_response());
        }
    };

    let hash = hash_password(&password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Could not process password".to_string(),
        )
    })?;

    match User::create(&state.db, &username, &email, &hash).await {
        Ok(user) => {
            info!(user_id = user.id, username = %user.username, "user registered");
            Ok(Redirect::to("/login").into_response())
        }
        Err(e) => match e.user_message() {
            Some(msg) => {
                warn!(error = %e, %username, "registration rejected");
                Ok(Html(views::render_register(&username, &email, Some(&msg))).into_response())
            }
            None => Err(internal(e)),
        },
    }
}

#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<String, (StatusCode, String)> {
    let (Some(username), Some(password)) = (present(form.username), form.password) else {
        warn!("login form incomplete");
        return Ok(LOGIN_FAILED.into());
    };

    // unknown user and wrong password answer the same way
    match User::find_by_username(&state.db, &username)
        .await
        .map_err(internal)?
    {
        Some(user) if verify_password(&password, &user.password) => {
            info!(user_id = user.id, username = %user.username, "user logged in");
            Ok(format!("Welcome, {}!", user.username))
        }
        Some(user) => {
            warn!(user_id = user.id, "login invalid password");
            Ok(LOGIN_FAILED.into())
        }
        None => {
            warn!(%username, "login unknown username");
            Ok(LOGIN_FAILED.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{get, post_form, send};
    use crate::app::build_app;

    #[tokio::test]
    async fn register_then_login_welcomes_user() {
        let state = AppState::in_memory().await;
        let app = build_app(state.clone());

        let (status, headers, _) = send(
            &app,
            post_form("/register", "username=alice&email=a%40x.com&password=secret1"),
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers["location"], "/login");

        let stored = User::find_by_username(&state.db, "alice").await.unwrap().unwrap();
        assert_eq!(stored.email, "a@x.com");
        assert_ne!(stored.password, "secret1");
        assert!(verify_password("secret1", &stored.password));

        let (status, _, body) =
            send(&app, post_form("/login", "username=alice&password=secret1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Welcome, alice!");
    }

    #[tokio::test]
    async fn duplicate_registration_rerenders_form() {
        let state = AppState::in_memory().await;
        let app = build_app(state.clone());

        send(&app, post_form("/register", "username=alice&email=a%40x.com&password=secret1")).await;
        let (status, _, body) = send(
            &app,
            post_form("/register", "username=alice&email=b%40x.com&password=other"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Username already registered."));
        assert!(body.contains(r#"value="b@x.com""#));

        let (_, _, body) = send(
            &app,
            post_form("/register", "username=bob&email=a%40x.com&password=other"),
        )
        .await;
        assert!(body.contains("Email already registered."));

        assert_eq!(User::list_all(&state.db).await.unwrap().len(), 1);

        // the original credentials still work
        let (_, _, body) =
            send(&app, post_form("/login", "username=alice&password=secret1")).await;
        assert_eq!(body, "Welcome, alice!");
    }

    #[tokio::test]
    async fn register_with_missing_field_shows_error() {
        let state = AppState::in_memory().await;
        let app = build_app(state.clone());

        let (status, _, body) =
            send(&app, post_form("/register", "username=alice&email=")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(MISSING_FIELDS));
        assert!(body.contains(r#"value="alice""#));
        assert!(User::list_all(&state.db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn register_with_overlong_username_shows_error() {
        let state = AppState::in_memory().await;
        let app = build_app(state);

        let form = format!("username={}&email=a%40x.com&password=pw", "u".repeat(81));
        let (status, _, body) = send(&app, post_form("/register", &form)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Username is too long."));
    }

    #[tokio::test]
    async fn wrong_password_gets_failure_message() {
        let state = AppState::in_memory().await;
        let app = build_app(state);

        send(&app, post_form("/register", "username=alice&email=a%40x.com&password=secret1")).await;
        let (status, _, body) =
            send(&app, post_form("/login", "username=alice&password=secret2")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, LOGIN_FAILED);
        assert!(!body.contains("Welcome"));
    }

    #[tokio::test]
    async fn unknown_user_and_missing_fields_get_same_failure() {
        let app = build_app(AppState::in_memory().await);

        let (_, _, unknown) =
            send(&app, post_form("/login", "username=nobody&password=secret1")).await;
        let (_, _, missing) = send(&app, post_form("/login", "username=nobody")).await;
        let (_, _, empty) = send(&app, post_form("/login", "")).await;
        assert_eq!(unknown, LOGIN_FAILED);
        assert_eq!(missing, LOGIN_FAILED);
        assert_eq!(empty, LOGIN_FAILED);
    }

    #[tokio::test]
    async fn quick_added_user_cannot_log_in() {
        let state = AppState::in_memory().await;
        let app = build_app(state);

        send(&app, get("/add_user/carol/c@x.com")).await;
        let (_, _, body) = send(&app, post_form("/login", "username=carol&password=")).await;
        assert_eq!(body, LOGIN_FAILED);
    }

    #[tokio::test]
    async fn form_pages_render() {
        let app = build_app(AppState::in_memory().await);

        let (status, headers, body) = send(&app, get("/register")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers["content-type"].to_str().unwrap().starts_with("text/html"));
        assert!(body.contains(r#"action="/register""#));

        let (status, _, body) = send(&app, get("/login")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"action="/login""#));
    }
}
