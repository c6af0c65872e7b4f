use actix_web::cookie::Cookie;
use actix_web::HttpRequest;
use time::Duration;

/// Name of the session cookie holding the access token.
pub const AUTH_COOKIE_NAME: &str = "Authorization";

/// Browser-side lifetime of the session cookie, shorter than the token itself.
pub const AUTH_COOKIE_MAX_AGE_SECS: i64 = 60 * 60;

/// Session cookie carrying a freshly minted token.
pub fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE_NAME, token.to_string())
        .path("/")
        .max_age(Duration::seconds(AUTH_COOKIE_MAX_AGE_SECS))
        .http_only(true)
        .secure(false)
        .finish()
}

/// Drops an optional `Bearer ` prefix.
pub fn strip_bearer(value: &str) -> &str {
    value.strip_prefix("Bearer ").unwrap_or(value).trim()
}

/// Token from the session cookie, if one is present and non-empty.
pub fn token_from_request(req: &HttpRequest) -> Option<String> {
    let cookie = req.cookie(AUTH_COOKIE_NAME)?;
    let token = strip_bearer(cookie.value());
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
