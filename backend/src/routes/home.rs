//! Landing page
//!
//! Only reachable with a valid session; [`SessionUser`] redirects anonymous
//! visitors to the login page.

use crate::auth::SessionUser;
use crate::views;
use axum::response::Html;

/// GET /
pub async fn home(SessionUser(credential): SessionUser) -> Html<String> {
    views::home_page(&credential.username)
}
