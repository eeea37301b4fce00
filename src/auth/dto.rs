use serde::Deserialize;

/// Form body for `POST /register`.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Form body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Treats an empty form field the same as a missing one.
pub(crate) fn present(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.is_empty())
}
