// Integration tests for the JwtExtract auth gate.
//
// A guarded handler behind the gate counts its invocations so each rejection
// test can prove the handler never ran.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use actix_web::{test, web, HttpResponse};
use backend::extractors::CurrentUser;
use backend::middleware::JwtExtract;
use backend::state::security_config::SecurityConfig;

use crate::common::assert_error_view;
use crate::support::auth::{auth_cookie, mint_expired_token, mint_test_token};
use crate::support::{create_test_app, memory_state, test_security};

async fn guarded(current: CurrentUser, hits: web::Data<AtomicUsize>) -> HttpResponse {
    hits.fetch_add(1, Ordering::SeqCst);
    HttpResponse::Ok().body(format!("hello {}", current.username))
}

macro_rules! guarded_app {
    ($hits:expr) => {{
        let (state, _store) = memory_state().await;
        let hits = $hits.clone();
        create_test_app(state)
            .with_routes(move |cfg| {
                cfg.app_data(web::Data::from(hits.clone())).service(
                    web::resource("/guarded")
                        .wrap(JwtExtract)
                        .route(web::get().to(guarded)),
                );
            })
            .build()
            .await
    }};
}

#[actix_web::test]
async fn missing_cookie_is_rejected_before_handler() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = guarded_app!(hits);

    let req = test::TestRequest::get().uri("/guarded").to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_view(resp, 401, "UNAUTHORIZED", "Authorization token not provided").await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn empty_cookie_is_rejected() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = guarded_app!(hits);

    let req = test::TestRequest::get()
        .uri("/guarded")
        .cookie(auth_cookie(""))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_view(resp, 401, "UNAUTHORIZED", "Authorization token not provided").await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn token_signed_with_other_secret_is_rejected() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = guarded_app!(hits);

    let foreign = SecurityConfig::new("some-other-secret".as_bytes());
    let token = mint_test_token(1, "mallory", &foreign);
    let req = test::TestRequest::get()
        .uri("/guarded")
        .cookie(auth_cookie(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_view(resp, 401, "UNAUTHORIZED_INVALID_JWT", "Invalid token").await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn malformed_token_is_rejected() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = guarded_app!(hits);

    let req = test::TestRequest::get()
        .uri("/guarded")
        .cookie(auth_cookie("definitely.not.ajwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_view(resp, 401, "UNAUTHORIZED_INVALID_JWT", "Invalid token").await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn expired_token_is_rejected() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = guarded_app!(hits);

    let token = mint_expired_token(1, "alice", &test_security());
    let req = test::TestRequest::get()
        .uri("/guarded")
        .cookie(auth_cookie(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_view(resp, 401, "UNAUTHORIZED_EXPIRED_JWT", "Token expired").await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn valid_token_reaches_handler_with_claims() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = guarded_app!(hits);

    let token = mint_test_token(5, "alice", &test_security());
    let req = test::TestRequest::get()
        .uri("/guarded")
        .cookie(auth_cookie(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body = test::read_body(resp).await;
    assert_eq!(body.as_ref(), b"hello alice");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn bearer_prefix_in_cookie_is_accepted() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = guarded_app!(hits);

    let token = mint_test_token(5, "alice", &test_security());
    let req = test::TestRequest::get()
        .uri("/guarded")
        .cookie(auth_cookie(&format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn bearer_header_alone_is_not_a_session() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = guarded_app!(hits);

    let token = mint_test_token(5, "alice", &test_security());
    let req = test::TestRequest::get()
        .uri("/guarded")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 401);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}
