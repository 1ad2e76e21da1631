//! The `session_id` cookie.

use axum_extra::extract::cookie::{Cookie, SameSite};
use cookie::time::Duration as CookieDuration;

use dirbrowse_core::config::SESSION_COOKIE_NAME;

/// Cookie carrying a freshly issued session token.
pub fn session_cookie(token: &str, max_age_seconds: i64, secure: bool) -> Cookie<'static> {
    base(token.to_owned(), secure)
        .max_age(CookieDuration::seconds(max_age_seconds))
        .build()
}

/// Cookie instructing the browser to drop the session token.
pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    base(String::new(), secure)
        .max_age(CookieDuration::seconds(-1))
        .build()
}

fn base(value: String, secure: bool) -> cookie::CookieBuilder<'static> {
    Cookie::build((SESSION_COOKIE_NAME, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
}
