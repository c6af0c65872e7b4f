use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::cookie::token_from_request;
use crate::auth::jwt::{verify_access_token, Claims};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Optional session for public pages: `Some` only when the cookie holds a
/// token that verifies. Never rejects the request.
#[derive(Debug, Clone)]
pub struct Session(pub Option<Claims>);

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl FromRequest for Session {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = match (
            token_from_request(req),
            req.app_data::<web::Data<AppState>>(),
        ) {
            (Some(token), Some(state)) => verify_access_token(&token, &state.security).ok(),
            _ => None,
        };
        ready(Ok(Session(claims)))
    }
}
