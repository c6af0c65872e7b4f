//! Server-rendered HTML pages.
//!
//! Every value that originates from a request or the database goes through
//! [`escape`] before it is interpolated.

use actix_web::http::StatusCode;

use crate::errors::ErrorCode;
use crate::repos::users::User;
use crate::routes::users::{ADD_PATH, HOME_PATH, LOGIN_PATH, REGISTER_PATH};

/// Escape text for use in HTML element content and quoted attributes.
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

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = escape(title),
    )
}

fn credentials_form(action: &str, submit: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <label>Username <input type=\"text\" name=\"username\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <button type=\"submit\">{submit}</button>\n\
         </form>"
    )
}

pub fn register_form() -> String {
    let body = format!(
        "<h1>Register</h1>\n{}\n<p>Already registered? <a href=\"{LOGIN_PATH}\">Log in</a></p>",
        credentials_form(REGISTER_PATH, "Register"),
    );
    layout("Register", &body)
}

pub fn login_form() -> String {
    let body = format!(
        "<h1>Log in</h1>\n{}\n<p>No account? <a href=\"{REGISTER_PATH}\">Register</a></p>",
        credentials_form(LOGIN_PATH, "Log in"),
    );
    layout("Log in", &body)
}

/// Landing page: greeting plus the full user listing.
pub fn home_page(username: &str, users: &[User]) -> String {
    let rows: String = users
        .iter()
        .map(|u| {
            format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                u.id,
                escape(&u.username)
            )
        })
        .collect();

    let body = format!(
        "<h1>Welcome, {name}</h1>\n\
         <h2>Users</h2>\n\
         <table>\n<thead><tr><th>ID</th><th>Username</th></tr></thead>\n\
         <tbody>\n{rows}</tbody>\n</table>\n\
         <h2>Add user</h2>\n{form}",
        name = escape(username),
        form = credentials_form(ADD_PATH, "Add"),
    );
    layout("Home", &body)
}

pub fn error_page(status: StatusCode, code: ErrorCode, detail: &str, trace_id: &str) -> String {
    let body = format!(
        "<h1>{status_code} {reason}</h1>\n\
         <p class=\"error\" data-code=\"{code}\">{detail}</p>\n\
         <p><small>trace id: {trace_id}</small></p>\n\
         <p><a href=\"{HOME_PATH}\">Back</a></p>",
        status_code = status.as_u16(),
        reason = status.canonical_reason().unwrap_or("Error"),
        code = code.as_str(),
        detail = escape(detail),
        trace_id = escape(trace_id),
    );
    layout("Error", &body)
}
