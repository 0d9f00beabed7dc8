//! Authentication routes
//!
//! Signup, login and logout pages. Rejected submissions re-render the same
//! form with a message; the submitted password is never echoed back.
//!
//! # Performance Optimizations
//!
//! - Uses pre-computed session keys from AppState (no per-request allocation)
//! - Password hashing runs on blocking thread pool (doesn't block async runtime)

use crate::error::AppError;
use crate::services::CredentialService;
use crate::state::AppState;
use crate::views::AuthPage;
use axum::{
    extract::{rejection::FormRejection, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use login_portal_shared::{CredentialForm, ValidationError};
use tracing::{debug, info, warn};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", get(signup_form).post(signup))
        .route("/login", get(login_form).post(login))
        .route("/logout", post(logout))
}

/// A failed form submission, rendered as the form it came from
#[derive(Debug)]
pub struct PageError {
    page: AuthPage,
    username: String,
    error: AppError,
}

impl PageError {
    fn new(page: AuthPage, username: &str, error: impl Into<AppError>) -> Self {
        Self {
            page,
            username: username.to_string(),
            error: error.into(),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        if self.error.is_internal() {
            return self.error.into_response();
        }
        let status = self.error.status_code();
        let message = self.error.user_message();
        (status, self.page.render(&self.username, Some(&message))).into_response()
    }
}

/// Unwrap the submitted form, turning an undecodable body into a form error
fn read_form(
    page: AuthPage,
    form: Result<Form<CredentialForm>, FormRejection>,
) -> Result<CredentialForm, PageError> {
    form.map(|Form(form)| form).map_err(|rejection| {
        debug!(status = %rejection.status(), reason = %rejection.body_text(), "Unreadable form");
        PageError::new(page, "", ValidationError::Unreadable)
    })
}

/// GET /signup
async fn signup_form() -> Html<String> {
    AuthPage::Signup.render("", None)
}

/// Register a new user
///
/// POST /signup
async fn signup(
    State(state): State<AppState>,
    form: Result<Form<CredentialForm>, FormRejection>,
) -> Result<Redirect, PageError> {
    let form = read_form(AuthPage::Signup, form)?;
    let username_hint = form.username_hint().to_string();
    let reject = |e: AppError| PageError::new(AuthPage::Signup, &username_hint, e);

    let credentials = form.validate().map_err(|e| reject(e.into()))?;
    CredentialService::create(state.db(), &credentials.username, credentials.password)
        .await
        .map_err(reject)?;

    Ok(Redirect::to("/login"))
}

/// GET /login
async fn login_form() -> Html<String> {
    AuthPage::Login.render("", None)
}

/// Login with username and password
///
/// POST /login
///
/// On success the session cookie is set and the browser is sent to the
/// landing page.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<CredentialForm>, FormRejection>,
) -> Result<(CookieJar, Redirect), PageError> {
    let form = read_form(AuthPage::Login, form)?;
    let username_hint = form.username_hint().to_string();
    let reject = |e: AppError| PageError::new(AuthPage::Login, &username_hint, e);

    let credentials = form.validate().map_err(|e| reject(e.into()))?;
    let credential = CredentialService::authenticate(state.db(), credentials)
        .await
        .map_err(|e| {
            if !e.is_internal() {
                warn!(username = %username_hint, "Failed login attempt");
            }
            reject(e)
        })?;

    let token = state
        .sessions()
        .issue(&credential)
        .map_err(|e| reject(AppError::Internal(e)))?;

    info!(user_id = credential.id, "User logged in");
    Ok((jar.add(state.sessions().cookie(token)), Redirect::to("/")))
}

/// Clear the session cookie
///
/// POST /logout
async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    (
        jar.remove(state.sessions().removal_cookie()),
        Redirect::to("/login"),
    )
}
