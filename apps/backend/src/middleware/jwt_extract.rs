//! Auth gate for protected resources.
//!
//! Reads the token from the `Authorization` cookie, verifies it and stores
//! the `Claims` in request extensions. Requests without a valid token are
//! answered with a 401 error view and never reach the handler.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use crate::auth::cookie::token_from_request;
use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware { service }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Render inside the returned future: `call` runs before the request's
        // trace scope is entered.
        let reject = |req: ServiceRequest, err: AppError| -> Self::Future {
            Box::pin(async move {
                debug!(code = %err.code(), path = req.path(), "auth gate rejected request");
                Ok(req.error_response(err).map_into_right_body())
            })
        };

        let Some(token) = token_from_request(req.request()) else {
            return reject(req, AppError::unauthorized());
        };

        let Some(app_state) = req.app_data::<web::Data<AppState>>().cloned() else {
            return reject(req, AppError::internal("AppState not available"));
        };

        match verify_access_token(&token, &app_state.security) {
            Ok(claims) => {
                // Store claims in request extensions BEFORE calling the service
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(err) => reject(req, err),
        }
    }
}
