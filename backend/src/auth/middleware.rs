//! Session resolution
//!
//! Turns the session cookie back into a [`Credential`] on every request that
//! needs an identity. A missing cookie, a token that fails validation and a
//! token naming a credential that no longer exists all resolve to "anonymous".

use crate::auth::SessionIdentity;
use crate::error::{AppError, AppResult};
use crate::repositories::Credential;
use crate::services::CredentialService;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

impl SessionIdentity for Credential {
    fn session_identifier(&self) -> i64 {
        self.id
    }
}

/// Resolve the session cookie in `jar` to a credential
///
/// `Ok(None)` means the request is anonymous. `Err` is reserved for storage
/// faults.
pub async fn load_session(state: &AppState, jar: &CookieJar) -> AppResult<Option<Credential>> {
    let Some(cookie) = jar.get(state.sessions().cookie_name()) else {
        return Ok(None);
    };

    let id = match state.sessions().resolve_identifier(cookie.value()) {
        Ok(id) => id,
        Err(e) => {
            debug!("Discarding session: {}", e);
            return Ok(None);
        }
    };

    let credential = CredentialService::find_by_id(state.db(), id).await?;
    if credential.is_none() {
        debug!(user_id = id, "Discarding session for unknown credential");
    }
    Ok(credential)
}

/// Authenticated user extracted from the session cookie
///
/// Handlers taking this extractor are only reachable with a valid session;
/// anonymous requests are redirected to the login page.
#[derive(Debug, Clone)]
pub struct SessionUser(pub Credential);

/// Why a [`SessionUser`] could not be extracted
#[derive(Debug)]
pub enum SessionRejection {
    /// No usable session; carries the jar with any stale cookie removed
    Anonymous(CookieJar),
    /// The credential lookup itself failed
    Internal(AppError),
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        match self {
            SessionRejection::Anonymous(jar) => (jar, Redirect::to("/login")).into_response(),
            SessionRejection::Internal(err) => err.into_response(),
        }
    }
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for SessionUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = SessionRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        match load_session(&app_state, &jar).await {
            Ok(Some(credential)) => Ok(SessionUser(credential)),
            Ok(None) => {
                let jar = if jar.get(app_state.sessions().cookie_name()).is_some() {
                    jar.remove(app_state.sessions().removal_cookie())
                } else {
                    jar
                };
                Err(SessionRejection::Anonymous(jar))
            }
            Err(err) => Err(SessionRejection::Internal(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::db;
    use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
    use chrono::Utc;

    async fn test_state() -> AppState {
        let pool = db::create_pool_with_config(&db::DbConfig::in_memory())
            .await
            .unwrap();
        db::run_migrations(&pool).await.unwrap();
        AppState::new(pool, AppConfig::default())
    }

    fn jar_with(name: &str, value: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("{}={}", name, value)).unwrap(),
        );
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn test_credential_identity_is_its_id() {
        let credential = Credential {
            id: 17,
            username: "alice".to_string(),
            password_hash: "hash".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(credential.session_identifier(), 17);
    }

    #[tokio::test]
    async fn test_no_cookie_is_anonymous() {
        let state = test_state().await;
        let loaded = load_session(&state, &CookieJar::new()).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_garbage_cookie_is_anonymous() {
        let state = test_state().await;
        let jar = jar_with("session", "not-a-token");
        assert!(load_session(&state, &jar).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_valid_cookie_resolves_credential() {
        let state = test_state().await;
        let credential =
            crate::repositories::CredentialRepository::create(state.db(), "alice", "hash")
                .await
                .unwrap();
        let token = state.sessions().issue(&credential).unwrap();

        let loaded = load_session(&state, &jar_with("session", &token))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.id, credential.id);
        assert_eq!(loaded.username, "alice");
    }

    #[tokio::test]
    async fn test_token_for_missing_credential_is_anonymous() {
        let state = test_state().await;
        let ghost = Credential {
            id: 404,
            username: "ghost".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        };
        let token = state.sessions().issue(&ghost).unwrap();

        assert!(load_session(&state, &jar_with("session", &token))
            .await
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_anonymous_rejection_redirects_to_login() {
        let response = SessionRejection::Anonymous(CookieJar::new()).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }
}
