use std::time::SystemTime;

use actix_web::http::header;
use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::auth::cookie::session_cookie;
use crate::auth::jwt::mint_access_token;
use crate::error::AppError;
use crate::extractors::{CurrentUser, Session};
use crate::middleware::JwtExtract;
use crate::repos::users::User;
use crate::state::app_state::AppState;
use crate::views;

pub const SCOPE: &str = "/api/v1/user";
pub const REGISTER_PATH: &str = "/api/v1/user/register";
pub const LOGIN_PATH: &str = "/api/v1/user/login";
pub const HOME_PATH: &str = "/api/v1/user/home";
pub const ADD_PATH: &str = "/api/v1/user/add";

/// Form body shared by register, login and add. Missing fields are empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(header::ContentType::html())
        .body(body)
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn issue_token(user: &User, state: &AppState) -> Result<String, AppError> {
    mint_access_token(user.id, &user.username, SystemTime::now(), &state.security)
}

async fn register_form(session: Session) -> HttpResponse {
    if session.is_authenticated() {
        return see_other(HOME_PATH);
    }
    html(views::register_form())
}

async fn login_form(session: Session) -> HttpResponse {
    if session.is_authenticated() {
        return see_other(HOME_PATH);
    }
    html(views::login_form())
}

/// Create the account, start a session and send the browser home.
async fn register(
    form: web::Form<CredentialsForm>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = app_state
        .users
        .register(&form.username, &form.password)
        .await
        .map_err(AppError::bad_request_from)?;

    let token = issue_token(&user, &app_state)?;

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, HOME_PATH))
        .cookie(session_cookie(&token))
        .finish())
}

/// Check credentials and render the landing page directly.
async fn login(
    form: web::Form<CredentialsForm>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = app_state
        .users
        .login(&form.username, &form.password)
        .await
        .map_err(|e| {
            debug!(error = %e, "login rejected");
            AppError::invalid_credentials()
        })?;

    let token = issue_token(&user, &app_state)?;
    // The session is already established; a failed listing only empties the table.
    let users = app_state.users.list_all().await.unwrap_or_else(|e| {
        warn!(error = %e, "listing users after login failed");
        Vec::new()
    });

    Ok(HttpResponse::Ok()
        .content_type(header::ContentType::html())
        .cookie(session_cookie(&token))
        .body(views::home_page(&user.username, &users)))
}

/// Register another account on behalf of a signed-in user.
async fn add_user(
    _current: CurrentUser,
    form: web::Form<CredentialsForm>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state
        .users
        .register(&form.username, &form.password)
        .await
        .map_err(|e| AppError::internal(e.to_string()))?;

    Ok(see_other(HOME_PATH))
}

async fn home(
    current: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let users = load_users(&app_state).await?;
    Ok(html(views::home_page(&current.username, &users)))
}

async fn load_users(app_state: &AppState) -> Result<Vec<User>, AppError> {
    app_state.users.list_all().await.map_err(|e| {
        debug!(error = %e, "listing users failed");
        AppError::db("Failed to load users")
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/register")
            .route(web::get().to(register_form))
            .route(web::post().to(register)),
    )
    .service(
        web::resource("/login")
            .route(web::get().to(login_form))
            .route(web::post().to(login)),
    )
    .service(
        web::resource("/home")
            .wrap(JwtExtract)
            .route(web::get().to(home)),
    )
    .service(
        web::resource("/add")
            .wrap(JwtExtract)
            .route(web::post().to(add_user)),
    );
}
