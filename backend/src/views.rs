//! HTML pages
//!
//! Pages are small enough to be assembled inline. Every value that
//! originates from user input goes through [`escape`].

use axum::{http::StatusCode, response::Html};

/// The two credential forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPage {
    Signup,
    Login,
}

impl AuthPage {
    fn title(self) -> &'static str {
        match self {
            AuthPage::Signup => "Sign up",
            AuthPage::Login => "Log in",
        }
    }

    fn action(self) -> &'static str {
        match self {
            AuthPage::Signup => "/signup",
            AuthPage::Login => "/login",
        }
    }

    fn alternate(self) -> (&'static str, &'static str) {
        match self {
            AuthPage::Signup => ("/login", "Already registered? Log in"),
            AuthPage::Login => ("/signup", "No account yet? Sign up"),
        }
    }

    /// Render the form, optionally with an error and the previous username
    ///
    /// The password field is always rendered empty.
    pub fn render(self, username: &str, error: Option<&str>) -> Html<String> {
        let error = error
            .map(|msg| format!(r#"<p class="error" role="alert">{}</p>"#, escape(msg)))
            .unwrap_or_default();
        let (alt_href, alt_text) = self.alternate();

        layout(
            self.title(),
            &format!(
                r#"<h1>{title}</h1>
{error}
<form method="post" action="{action}">
  <label for="login-id">Username</label>
  <input id="login-id" name="login-id" type="text" maxlength="50" value="{username}" required>
  <label for="password">Password</label>
  <input id="password" name="password" type="password" required>
  <button type="submit">{title}</button>
</form>
<p><a href="{alt_href}">{alt_text}</a></p>"#,
                title = self.title(),
                action = self.action(),
                username = escape(username),
            ),
        )
    }
}

/// Landing page for an authenticated user
pub fn home_page(username: &str) -> Html<String> {
    layout(
        "Home",
        &format!(
            r#"<h1>Welcome, {}</h1>
<form method="post" action="/logout">
  <button type="submit">Log out</button>
</form>"#,
            escape(username)
        ),
    )
}

/// Generic error page
pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    layout(
        status.canonical_reason().unwrap_or("Error"),
        &format!(
            r#"<h1>{}</h1>
<p>{}</p>
<p><a href="/">Back</a></p>"#,
            status.as_u16(),
            escape(message)
        ),
    )
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{}</title></head>
<body>
{}
</body>
</html>"#,
        escape(title),
        body
    ))
}

/// Escape text for use in HTML content and quoted attributes
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
