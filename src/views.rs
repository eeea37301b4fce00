//! HTML pages.
//!
//! Every page is a plain `format!` over a shared layout. Anything that came
//! from a request or from the database goes through [`escape`] first.

use crate::users::repo_types::User;

fn base_style() -> &'static str {
    r#"
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body {
        font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
        background: #f5f5f5; color: #333;
        display: flex; justify-content: center; align-items: flex-start;
        min-height: 100vh; padding: 40px 20px;
    }
    .card {
        background: #fff; border-radius: 16px; padding: 32px;
        max-width: 520px; width: 100%; box-shadow: 0 4px 24px rgba(0,0,0,0.08);
    }
    h1 { font-size: 24px; color: #1a1a2e; margin-bottom: 20px; }
    .form-group { margin-bottom: 16px; }
    .form-group label { display: block; font-size: 14px; font-weight: 500; margin-bottom: 6px; color: #444; }
    .form-group input {
        width: 100%; padding: 12px 14px; border: 1.5px solid #ddd;
        border-radius: 10px; font-size: 16px; outline: none;
    }
    .form-group input:focus { border-color: #4a6cf7; }
    .btn {
        width: 100%; padding: 14px; border: none; border-radius: 10px;
        font-size: 16px; font-weight: 600; cursor: pointer;
        background: #4a6cf7; color: #fff;
    }
    .btn:hover { background: #3b5de7; }
    .error { background: #fff0f0; color: #d32f2f; padding: 10px 14px; border-radius: 8px; font-size: 13px; margin-bottom: 16px; }
    .link { text-align: center; margin-top: 16px; font-size: 14px; color: #666; }
    .link a, nav a { color: #4a6cf7; text-decoration: none; }
    nav ul { list-style: none; }
    nav li { padding: 8px 0; }
    table { width: 100%; border-collapse: collapse; font-size: 14px; }
    th, td { text-align: left; padding: 8px; border-bottom: 1px solid #eee; }
    .empty { color: #888; font-size: 14px; }
    "#
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head><body>
<div class="card">
{body}
</div>
</body></html>"#,
        style = base_style(),
    )
}

fn error_block(error: Option<&str>) -> String {
    error
        .map(|e| format!(r#"<div class="error">{}</div>"#, escape(e)))
        .unwrap_or_default()
}

/// Minimal HTML escaping for text and attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_index() -> String {
    layout(
        "Home",
        r#"<h1>User registry</h1>
<nav><ul>
  <li><a href="/register">Create an account</a></li>
  <li><a href="/login">Log in</a></li>
  <li><a href="/users">Registered users</a></li>
  <li><a href="/form">Send a name</a></li>
</ul></nav>"#,
    )
}

pub fn render_name_form() -> String {
    layout(
        "Form",
        r#"<h1>Say hello</h1>
<form method="POST" action="/processar">
  <div class="form-group">
    <label for="nome">Name</label>
    <input type="text" id="nome" name="nome" required>
  </div>
  <button type="submit" class="btn">Send</button>
</form>"#,
    )
}

/// Register form; `username`/`email` are echoed back after a failed attempt.
pub fn render_register(username: &str, email: &str, error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Create an account</h1>
{error_html}
<form method="POST" action="/register">
  <div class="form-group">
    <label for="username">Username</label>
    <input type="text" id="username" name="username" value="{username}" maxlength="80" required autocomplete="username">
  </div>
  <div class="form-group">
    <label for="email">Email</label>
    <input type="email" id="email" name="email" value="{email}" maxlength="120" required autocomplete="email">
  </div>
  <div class="form-group">
    <label for="password">Password</label>
    <input type="password" id="password" name="password" required autocomplete="new-password">
  </div>
  <button type="submit" class="btn">Register</button>
</form>
<div class="link">Already registered? <a href="/login">Log in</a></div>"#,
        error_html = error_block(error),
        username = escape(username),
        email = escape(email),
    );
    layout("Register", &body)
}

pub fn render_login() -> String {
    layout(
        "Login",
        r#"<h1>Log in</h1>
<form method="POST" action="/login">
  <div class="form-group">
    <label for="username">Username</label>
    <input type="text" id="username" name="username" required autocomplete="username">
  </div>
  <div class="form-group">
    <label for="password">Password</label>
    <input type="password" id="password" name="password" required autocomplete="current-password">
  </div>
  <button type="submit" class="btn">Log in</button>
</form>
<div class="link">No account? <a href="/register">Register</a></div>"#,
    )
}

pub fn render_users(users: &[User]) -> String {
    let content = if users.is_empty() {
        r#"<p class="empty">No users yet.</p>"#.to_string()
    } else {
        let rows: String = users
            .iter()
            .map(|u| {
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    u.id,
                    escape(&u.username),
                    escape(&u.email)
                )
            })
            .collect();
        format!(
            "<table>\n<thead><tr><th>ID</th><th>Username</th><th>Email</th></tr></thead>\n<tbody>\n{rows}</tbody>\n</table>"
        )
    };
    layout(
        "Users",
        &format!(r#"<h1>Registered users</h1>{content}<div class="link"><a href="/">Home</a></div>"#),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, username: &str, email: &str) -> User {
        User {
            id,
            username: username.into(),
            email: email.into(),
            password: "$argon2id$secret-hash".into(),
        }
    }

    #[test]
    fn escape_handles_markup() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn users_page_lists_rows_without_passwords() {
        let html = render_users(&[user(1, "alice", "a@x.com"), user(2, "<b>bob</b>", "b@x.com")]);
        assert!(html.contains("<td>alice</td>"));
        assert!(html.contains("&lt;b&gt;bob&lt;/b&gt;"));
        assert!(!html.contains("<b>bob</b>"));
        assert!(!html.contains("secret-hash"));
        assert!(html.find("alice").unwrap() < html.find("bob").unwrap());
    }

    #[test]
    fn users_page_handles_empty_store() {
        assert!(render_users(&[]).contains("No users yet."));
    }

    #[test]
    fn register_page_echoes_values_and_error() {
        let html = render_register("al\"ice", "a@x.com", Some("Username already registered."));
        assert!(html.contains(r#"value="al&quot;ice""#));
        assert!(html.contains(r#"value="a@x.com""#));
        assert!(html.contains(r#"<div class="error">Username already registered.</div>"#));

        let clean = render_register("", "", None);
        assert!(!clean.contains(r#"class="error""#));
    }

    #[test]
    fn forms_post_to_their_routes() {
        assert!(render_name_form().contains(r#"action="/processar""#));
        assert!(render_name_form().contains(r#"name="nome""#));
        assert!(render_login().contains(r#"action="/login""#));
        assert!(render_index().contains(r#"href="/users""#));
    }
}
