use actix_web::web;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod users;

/// Register every application route.
///
/// Shared by `main.rs` and the integration tests so both exercise the same
/// paths, guards and extractor configuration.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, err.to_string()).into()
    }));

    // User routes: /api/v1/user/**
    cfg.service(web::scope(users::SCOPE).configure(users::configure_routes));
}
