//! Property-based tests for the landing page gate
//!
//! Any request to `/` without a valid session must be redirected to the
//! login page, never served and never turned into a server error.

#[cfg(test)]
mod tests {
    use crate::auth::{SessionIdentity, SessionService};
    use crate::config::{AppConfig, SessionConfig};
    use crate::db;
    use crate::routes::create_router;
    use crate::state::AppState;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use proptest::prelude::*;
    use sqlx::SqlitePool;
    use tower::ServiceExt;

    struct Id(i64);

    impl SessionIdentity for Id {
        fn session_identifier(&self) -> i64 {
            self.0
        }
    }

    /// State over a lazy pool; fine for requests that never reach the database
    fn create_test_state_sync() -> AppState {
        let pool = SqlitePool::connect_lazy("sqlite::memory:").unwrap();
        AppState::new(pool, AppConfig::default())
    }

    async fn create_test_state() -> AppState {
        let pool = db::create_pool_with_config(&db::DbConfig::in_memory())
            .await
            .unwrap();
        db::run_migrations(&pool).await.unwrap();
        AppState::new(pool, AppConfig::default())
    }

    async fn get_home(state: AppState, cookie: Option<String>) -> axum::response::Response {
        let mut builder = Request::builder().uri("/").method("GET");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        create_router(state)
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    fn assert_redirects_to_login(response: &axum::response::Response) {
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    /// Generate random invalid session tokens
    fn invalid_token_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("".to_string()),
            // Random string (not a JWT)
            "[a-zA-Z0-9]{10,50}",
            // Wrong number of parts
            "[a-zA-Z0-9]{10}\\.[a-zA-Z0-9]{10}",
            // JWT shape with a garbage signature
            "[a-zA-Z0-9_-]{20}\\.[a-zA-Z0-9_-]{20}\\.[a-zA-Z0-9_-]{20}",
        ]
    }

    /// Generate cookie headers that carry no valid session
    fn cookie_header_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            invalid_token_strategy().prop_map(|t| Some(format!("session={}", t))),
            invalid_token_strategy().prop_map(|t| Some(format!("other={}", t))),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Property: anonymous requests to the landing page are sent to /login
        #[test]
        fn prop_anonymous_requests_redirect_to_login(cookie in cookie_header_strategy()) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let response = get_home(create_test_state_sync(), cookie).await;

                prop_assert_eq!(response.status(), StatusCode::SEE_OTHER);
                prop_assert_eq!(
                    response.headers()[header::LOCATION].to_str().unwrap(),
                    "/login"
                );
                Ok(())
            })?;
        }
    }

    #[tokio::test]
    async fn test_missing_cookie_redirects() {
        let response = get_home(create_test_state_sync(), None).await;
        assert_redirects_to_login(&response);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_invalid_cookie_is_cleared() {
        let response = get_home(
            create_test_state_sync(),
            Some("session=invalid.token.here".to_string()),
        )
        .await;
        assert_redirects_to_login(&response);

        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.starts_with("session=;"));
    }

    #[tokio::test]
    async fn test_token_signed_by_other_process_redirects() {
        let other = SessionService::with_random_secret(&SessionConfig::default());
        let token = other.issue(&Id(1)).unwrap();

        let response = get_home(create_test_state_sync(), Some(format!("session={}", token))).await;
        assert_redirects_to_login(&response);
    }

    #[tokio::test]
    async fn test_valid_token_for_deleted_user_redirects() {
        let state = create_test_state().await;
        let token = state.sessions().issue(&Id(12345)).unwrap();

        let response = get_home(state, Some(format!("session={}", token))).await;
        assert_redirects_to_login(&response);
    }

    #[tokio::test]
    async fn test_signup_and_login_pages_render() {
        for path in ["/signup", "/login"] {
            let response = create_router(create_test_state_sync())
                .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }
}
